use crate::block::BlockColors;
use crate::palette::PaletteId;
use std::collections::BTreeMap;

/// Color usage collected while encoding an image.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ColorStats {
    pairs: BTreeMap<(PaletteId, PaletteId), usize>,
    total_blocks: usize,
    multi_color_blocks: usize,
}

impl ColorStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one encoded block.
    pub fn record(&mut self, colors: &BlockColors) {
        *self
            .pairs
            .entry((colors.background, colors.foreground))
            .or_insert(0) += 1;
        self.total_blocks += 1;
        if !colors.is_single_color {
            self.multi_color_blocks += 1;
        }
    }

    pub fn total_blocks(&self) -> usize {
        self.total_blocks
    }

    pub fn multi_color_blocks(&self) -> usize {
        self.multi_color_blocks
    }

    /// `((background, foreground), count)` in ascending pair order.
    pub fn pairs(&self) -> impl Iterator<Item = ((PaletteId, PaletteId), usize)> + '_ {
        self.pairs.iter().map(|(k, v)| (*k, *v))
    }

    pub fn pair_count(&self, background: PaletteId, foreground: PaletteId) -> usize {
        self.pairs
            .get(&(background, foreground))
            .copied()
            .unwrap_or(0)
    }

    /// Share of blocks needing two colors, in percent. 0 for an empty image.
    pub fn multi_color_percentage(&self) -> f64 {
        if self.total_blocks == 0 {
            return 0.0;
        }
        self.multi_color_blocks as f64 * 100.0 / self.total_blocks as f64
    }
}
