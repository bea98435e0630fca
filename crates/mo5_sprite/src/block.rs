//! Per-block color selection and pixel classification.
//!
//! A block is 8 horizontally adjacent pixels of one row. It is encoded as a
//! form byte (one bit per pixel, MSB = leftmost) and a color byte holding the
//! foreground id in the high nibble and the background id in the low nibble.

use crate::palette::{closest_color, color_distance, PaletteId};
use crate::{ALPHA_THRESHOLD, BLOCK_WIDTH};

/// An RGBA pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    /// Padding used past the right edge of the image.
    pub const TRANSPARENT: Pixel = Pixel {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Builds a pixel from 4 RGBA bytes.
    #[inline]
    pub fn from_rgba(c: &[u8]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }

    /// Alpha is binary: anything below 128 is fully transparent.
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.a >= ALPHA_THRESHOLD
    }

    #[inline]
    pub fn rgb(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// One 8 pixel segment of a row.
pub type PixelBlock = [Pixel; BLOCK_WIDTH];

/// The two colors chosen to represent a block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockColors {
    pub background: PaletteId,
    pub foreground: PaletteId,
    /// True when the block shows at most one distinct visible color.
    pub is_single_color: bool,
}

/// The two bytes a block turns into.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EncodedBlock {
    /// Bit `7 - i` set when pixel `i` is drawn in the foreground color.
    pub form: u8,
    /// `FFFFBBBB`: foreground id in bits 4-7, background id in bits 0-3.
    pub color: u8,
}

/// Reads the block starting at column `x` of an RGBA row.
///
/// Columns past the end of the row are returned as [`Pixel::TRANSPARENT`].
pub fn sample_block(row: &[u8], x: usize) -> PixelBlock {
    let width = row.len() / 4;
    let mut block = [Pixel::TRANSPARENT; BLOCK_WIDTH];
    for (i, pixel) in block.iter_mut().enumerate() {
        let col = x + i;
        if col < width {
            *pixel = Pixel::from_rgba(&row[col * 4..col * 4 + 4]);
        }
    }
    block
}

/// Picks the background and foreground colors of a block.
///
/// The most frequent palette match becomes the background, the second most
/// frequent the foreground. Equal counts keep the order in which the colors
/// first appear from left to right. Colors beyond the top two are dropped.
pub fn select_colors(block: &PixelBlock, default_background: PaletteId) -> BlockColors {
    // (color, count) in first-seen order
    let mut counts: Vec<(PaletteId, u8)> = Vec::with_capacity(BLOCK_WIDTH);
    for pixel in block.iter().filter(|p| p.is_visible()) {
        let color = closest_color(pixel.r, pixel.g, pixel.b);
        match counts.iter_mut().find(|(c, _)| *c == color) {
            Some((_, n)) => *n += 1,
            None => counts.push((color, 1)),
        }
    }

    match counts.len() {
        0 => BlockColors {
            background: default_background,
            foreground: default_background,
            is_single_color: true,
        },
        1 => BlockColors {
            background: default_background,
            foreground: counts[0].0,
            is_single_color: true,
        },
        _ => {
            // sort_by is stable, so ties stay in first-seen order
            counts.sort_by(|a, b| b.1.cmp(&a.1));
            BlockColors {
                background: counts[0].0,
                foreground: counts[1].0,
                is_single_color: false,
            }
        }
    }
}

/// Returns `true` when `pixel` belongs to the foreground of the block.
///
/// Visible pixels are compared by their raw RGB against both chosen colors,
/// not by their own nearest palette match, so a pixel whose best match is a
/// third color still lands on the closer of the two. Ties go to the
/// foreground. Transparent pixels are always background.
pub fn classify(pixel: &Pixel, colors: &BlockColors) -> bool {
    if !pixel.is_visible() {
        return false;
    }
    let rgb = pixel.rgb();
    let dist_fg = color_distance(rgb, colors.foreground.rgb());
    let dist_bg = color_distance(rgb, colors.background.rgb());
    dist_fg <= dist_bg
}

/// Packs a background/foreground pair into an MO5 attribute byte.
#[inline]
pub fn pack_color_byte(background: PaletteId, foreground: PaletteId) -> u8 {
    (foreground.get() << 4) | background.get()
}

/// Splits an attribute byte into `(background, foreground)`.
#[inline]
pub fn unpack_color_byte(color: u8) -> (PaletteId, PaletteId) {
    let background = PaletteId::new(color & 0x0F).unwrap_or_default();
    let foreground = PaletteId::new(color >> 4).unwrap_or_default();
    (background, foreground)
}

/// Selects the block colors and encodes the block into its two bytes.
pub fn encode_block(block: &PixelBlock, default_background: PaletteId) -> (EncodedBlock, BlockColors) {
    let colors = select_colors(block, default_background);
    let form = block
        .iter()
        .enumerate()
        .filter(|(_, pixel)| classify(pixel, &colors))
        .fold(0u8, |acc, (i, _)| acc | (0x80 >> i));
    let encoded = EncodedBlock {
        form,
        color: pack_color_byte(colors.background, colors.foreground),
    };
    (encoded, colors)
}
