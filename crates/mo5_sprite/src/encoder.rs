//! MO5 bitmap encoder.
//!
//! Walks the image top to bottom, left to right, one 8 pixel block at a
//! time, and fills the form and color planes in that order.

use crate::block::{encode_block, sample_block, EncodedBlock};
use crate::palette::PaletteId;
use crate::stats::ColorStats;
use crate::{Mo5Error, Result, BLOCK_WIDTH};

/// What to do with the columns of an image whose width is not a multiple of 8.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WidthPolicy {
    /// Drop the trailing columns.
    #[default]
    Truncate,
    /// Encode a final partial block, padded with transparent pixels.
    Pad,
}

/// Options for the MO5 encoder.
#[derive(Clone, Debug, Default)]
pub struct EncodeOptions {
    /// Background used by blocks with fewer than two visible colors.
    pub default_background: PaletteId,

    /// Handling of widths that are not a multiple of 8.
    pub width_policy: WidthPolicy,
}

/// An encoded image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sprite {
    /// Encoded width in pixels (a multiple of 8 unless padded).
    pub width: usize,
    pub height: usize,
    /// Blocks per row.
    pub bytes_per_line: usize,
    /// Bitmap plane, one bit per pixel, row-major.
    pub form: Vec<u8>,
    /// Attribute plane, one `FFFFBBBB` byte per block, row-major.
    pub color: Vec<u8>,
    pub stats: ColorStats,
}

impl Sprite {
    fn with_capacity(width: usize, height: usize, bytes_per_line: usize) -> Self {
        Self {
            width,
            height,
            bytes_per_line,
            form: Vec::with_capacity(bytes_per_line * height),
            color: Vec::with_capacity(bytes_per_line * height),
            stats: ColorStats::new(),
        }
    }

    fn push_row(&mut self, blocks: &[EncodedBlock]) {
        for block in blocks {
            self.form.push(block.form);
            self.color.push(block.color);
        }
    }

    /// Form bytes of row `y`.
    pub fn form_row(&self, y: usize) -> &[u8] {
        &self.form[y * self.bytes_per_line..(y + 1) * self.bytes_per_line]
    }

    /// Color bytes of row `y`.
    pub fn color_row(&self, y: usize) -> &[u8] {
        &self.color[y * self.bytes_per_line..(y + 1) * self.bytes_per_line]
    }

    /// Size of each plane in bytes.
    pub fn plane_len(&self) -> usize {
        self.bytes_per_line * self.height
    }
}

/// Encode RGBA image data into MO5 form and color planes.
///
/// # Arguments
/// * `rgba` - Raw RGBA pixel data (4 bytes per pixel: R, G, B, A)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `opts` - Encoding options
///
/// Pixels with alpha below 128 are transparent and always encode as
/// background.
///
/// # Example
/// ```ignore
/// use mo5_sprite::{mo5_encode, EncodeOptions};
///
/// let rgba = [255u8, 0, 0, 255].repeat(8); // 8 red pixels
/// let sprite = mo5_encode(&rgba, 8, 1, &EncodeOptions::default())?;
/// assert_eq!(sprite.form, vec![0xFF]);
/// assert_eq!(sprite.color, vec![0x10]);
/// ```
#[must_use = "this returns the encoded sprite"]
pub fn mo5_encode(
    rgba: &[u8],
    width: usize,
    height: usize,
    opts: &EncodeOptions,
) -> Result<Sprite> {
    if width == 0 || height == 0 {
        return Err(Mo5Error::InvalidDimensions { width, height });
    }
    let expected = width * height * 4;
    if rgba.len() != expected {
        return Err(Mo5Error::BufferSizeMismatch {
            expected,
            actual: rgba.len(),
        });
    }

    let encoded_width = match opts.width_policy {
        WidthPolicy::Truncate => width - width % BLOCK_WIDTH,
        WidthPolicy::Pad => width,
    };
    if encoded_width == 0 {
        return Err(Mo5Error::InvalidDimensions { width, height });
    }
    if encoded_width != width {
        log::warn!("width {width} is not a multiple of 8, truncated to {encoded_width}");
    }
    let bytes_per_line = encoded_width.div_ceil(BLOCK_WIDTH);
    log::debug!(
        "encoding {encoded_width}x{height} ({bytes_per_line} bytes per line), default background {}",
        opts.default_background.entry().name
    );

    let mut sprite = Sprite::with_capacity(encoded_width, height, bytes_per_line);
    let mut blocks = Vec::with_capacity(bytes_per_line);

    for (y, row) in rgba.chunks_exact(width * 4).enumerate() {
        // Only the encoded columns take part; truncated ones must not leak
        // into the last block.
        let row = &row[..encoded_width * 4];
        blocks.clear();
        for x in (0..encoded_width).step_by(BLOCK_WIDTH) {
            let block = sample_block(row, x);
            let (encoded, colors) = encode_block(&block, opts.default_background);
            sprite.stats.record(&colors);
            blocks.push(encoded);
        }
        log::trace!("row {y}: {} blocks", blocks.len());
        sprite.push_row(&blocks);
    }

    log::debug!(
        "encoded {} blocks, {} multi-color",
        sprite.stats.total_blocks(),
        sprite.stats.multi_color_blocks()
    );
    Ok(sprite)
}

/// Encode RGBA with default options.
#[inline]
#[must_use = "this returns the encoded sprite"]
pub fn mo5_encode_default(rgba: &[u8], width: usize, height: usize) -> Result<Sprite> {
    mo5_encode(rgba, width, height, &EncodeOptions::default())
}
