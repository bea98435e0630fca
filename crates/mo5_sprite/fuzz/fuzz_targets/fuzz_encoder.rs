#![no_main]

use libfuzzer_sys::fuzz_target;
use mo5_sprite::{mo5_encode, EncodeOptions, PaletteId, WidthPolicy};
use arbitrary::Arbitrary;

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    width: u8,
    height: u8,
    pixels: Vec<u8>,
    default_background: u8,
    pad: bool,
}

fuzz_target!(|input: FuzzInput| {
    let width = (input.width as usize).max(1);
    let height = (input.height as usize).max(1).min(64);

    // Ensure we have enough pixels (RGBA = 4 bytes per pixel)
    let expected_size = width * height * 4;
    if input.pixels.len() < expected_size {
        return;
    }

    let pixels = &input.pixels[..expected_size];
    let opts = EncodeOptions {
        default_background: PaletteId::new(input.default_background & 0x0F).unwrap_or_default(),
        width_policy: if input.pad { WidthPolicy::Pad } else { WidthPolicy::Truncate },
    };

    let Ok(sprite) = mo5_encode(pixels, width, height, &opts) else {
        return;
    };

    assert_eq!(sprite.form.len(), sprite.bytes_per_line * height);
    assert_eq!(sprite.color.len(), sprite.form.len());
    assert_eq!(sprite.stats.total_blocks(), sprite.form.len());
    assert!(sprite.stats.multi_color_blocks() <= sprite.stats.total_blocks());
});
