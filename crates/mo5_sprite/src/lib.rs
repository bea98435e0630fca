//! # mo5_sprite
//!
//! Converts RGBA images into the two-plane bitmap format of the Thomson MO5.
//!
//! The MO5 bitmap mode stores one bit per pixel (the *form* plane) and one
//! attribute byte per group of 8 horizontal pixels (the *color* plane). An
//! attribute byte holds a foreground and a background color taken from a
//! fixed 16 color palette, so every 8 pixel block can show at most two colors.
//!
//! ## Features
//!
//! - **Palette matching**: nearest MO5 color by squared RGB distance
//! - **Encoder**: per-block dominant color selection and pixel classification
//! - **C output**: renders the planes as C arrays ready for an MO5 project
//!
//! ## Quick Start
//!
//! ```ignore
//! use mo5_sprite::{mo5_encode, EncodeOptions, PaletteId};
//!
//! // 8x1 RGBA image: 4 red pixels followed by 4 white pixels
//! let mut rgba = Vec::new();
//! rgba.extend([255, 0, 0, 255].repeat(4));
//! rgba.extend([255, 255, 255, 255].repeat(4));
//!
//! let sprite = mo5_encode(&rgba, 8, 1, &EncodeOptions::default())?;
//! assert_eq!(sprite.color, vec![0x71]);
//! ```

use thiserror::Error;

pub mod block;
pub mod c_source;
pub mod encoder;
pub mod palette;
pub mod stats;

pub use block::{
    classify, encode_block, pack_color_byte, sample_block, select_colors, unpack_color_byte,
    BlockColors, EncodedBlock, Pixel, PixelBlock,
};
pub use c_source::{render_c_source, sanitize_identifier, CSourceOptions};
pub use encoder::{mo5_encode, mo5_encode_default, EncodeOptions, Sprite, WidthPolicy};
pub use palette::{closest_color, color_distance, PaletteEntry, PaletteId, PALETTE};
pub use stats::ColorStats;

/// Errors that can occur while converting an image.
#[derive(Debug, Error)]
pub enum Mo5Error {
    /// Invalid image dimensions (zero, or narrower than one block after truncation)
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    /// Buffer size doesn't match expected size for dimensions
    #[error("buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// Palette index outside of 0-15
    #[error("invalid palette id {0} (expected 0-15)")]
    InvalidPaletteId(u8),

    /// Sprite name without any usable identifier character
    #[error("invalid sprite name: {0:?}")]
    InvalidName(String),
}

/// Result type for MO5 conversion operations.
pub type Result<T> = core::result::Result<T, Mo5Error>;

/// Pixels covered by one attribute byte.
pub const BLOCK_WIDTH: usize = 8;

/// Alpha values below this threshold are fully transparent.
pub(crate) const ALPHA_THRESHOLD: u8 = 128;
