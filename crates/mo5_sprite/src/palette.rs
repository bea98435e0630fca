//! The fixed 16 color MO5 palette and nearest color matching.
//!
//! RGB values are approximations of the colors produced by the MO5 video
//! hardware. Indices match the `C_*` color macros of the MO5 SDK headers.

use crate::{Mo5Error, Result};
use std::fmt;

/// Index into [`PALETTE`], always in the range 0-15.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PaletteId(u8);

impl PaletteId {
    pub const BLACK: Self = Self(0);
    pub const RED: Self = Self(1);
    pub const GREEN: Self = Self(2);
    pub const YELLOW: Self = Self(3);
    pub const BLUE: Self = Self(4);
    pub const MAGENTA: Self = Self(5);
    pub const CYAN: Self = Self(6);
    pub const WHITE: Self = Self(7);
    pub const GRAY: Self = Self(8);
    pub const LIGHT_RED: Self = Self(9);
    pub const LIGHT_GREEN: Self = Self(10);
    pub const LIGHT_YELLOW: Self = Self(11);
    pub const LIGHT_BLUE: Self = Self(12);
    pub const PURPLE: Self = Self(13);
    pub const LIGHT_CYAN: Self = Self(14);
    pub const ORANGE: Self = Self(15);

    /// Returns `None` if `id` is not a palette index.
    #[inline]
    pub const fn new(id: u8) -> Option<Self> {
        if (id as usize) < PALETTE.len() {
            Some(Self(id))
        } else {
            None
        }
    }

    /// The raw index, guaranteed to fit in a nibble.
    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn entry(self) -> &'static PaletteEntry {
        &PALETTE[self.0 as usize]
    }

    #[inline]
    pub fn rgb(self) -> [u8; 3] {
        let e = self.entry();
        [e.r, e.g, e.b]
    }
}

impl TryFrom<u8> for PaletteId {
    type Error = Mo5Error;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value).ok_or(Mo5Error::InvalidPaletteId(value))
    }
}

impl From<PaletteId> for u8 {
    fn from(id: PaletteId) -> u8 {
        id.0
    }
}

impl fmt::Display for PaletteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One entry of the MO5 palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaletteEntry {
    pub id: PaletteId,
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// SDK color name without the `C_` prefix.
    pub name: &'static str,
}

const fn entry(id: u8, r: u8, g: u8, b: u8, name: &'static str) -> PaletteEntry {
    PaletteEntry {
        id: PaletteId(id),
        r,
        g,
        b,
        name,
    }
}

/// The MO5 palette in hardware index order.
pub const PALETTE: [PaletteEntry; 16] = [
    entry(0, 0, 0, 0, "BLACK"),
    entry(1, 255, 0, 0, "RED"),
    entry(2, 0, 255, 0, "GREEN"),
    entry(3, 255, 255, 0, "YELLOW"),
    entry(4, 0, 0, 255, "BLUE"),
    entry(5, 255, 0, 255, "MAGENTA"),
    entry(6, 0, 255, 255, "CYAN"),
    entry(7, 255, 255, 255, "WHITE"),
    entry(8, 128, 128, 128, "GRAY"),
    entry(9, 255, 128, 128, "LIGHT_RED"),
    entry(10, 128, 255, 128, "LIGHT_GREEN"),
    entry(11, 255, 255, 128, "LIGHT_YELLOW"),
    entry(12, 128, 128, 255, "LIGHT_BLUE"),
    entry(13, 255, 128, 255, "PURPLE"),
    entry(14, 128, 255, 255, "LIGHT_CYAN"),
    entry(15, 255, 128, 0, "ORANGE"),
];

/// Squared euclidean distance between two RGB colors.
#[inline]
pub fn color_distance(a: [u8; 3], b: [u8; 3]) -> u32 {
    let dr = a[0].abs_diff(b[0]) as u32;
    let dg = a[1].abs_diff(b[1]) as u32;
    let db = a[2].abs_diff(b[2]) as u32;
    dr * dr + dg * dg + db * db
}

/// Returns the palette color closest to `(r, g, b)`.
///
/// On equal distances the lowest index wins.
pub fn closest_color(r: u8, g: u8, b: u8) -> PaletteId {
    let mut best = PaletteId::BLACK;
    let mut best_distance = u32::MAX;
    for e in &PALETTE {
        let distance = color_distance([r, g, b], [e.r, e.g, e.b]);
        if distance < best_distance {
            best_distance = distance;
            best = e.id;
        }
    }
    best
}
