use image::{Rgba, RgbaImage};
use mo5_sprite::*;
use pretty_assertions::assert_eq;

const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);
const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

fn encode(img: &RgbaImage, opts: &EncodeOptions) -> Sprite {
    let (w, h) = img.dimensions();
    mo5_encode(img.as_raw(), w as usize, h as usize, opts).expect("encoding should succeed")
}

fn checkerboard(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        let r = (x * 37 + y * 11) as u8;
        let g = (x * 5 ^ y * 29) as u8;
        let b = (x * y) as u8;
        let a = if (x + y) % 7 == 0 { 0 } else { 255 };
        Rgba([r, g, b, a])
    })
}

#[test]
fn test_uniform_block_uses_default_background() {
    let img = RgbaImage::from_pixel(8, 1, BLUE);
    let opts = EncodeOptions {
        default_background: PaletteId::YELLOW,
        ..Default::default()
    };
    let sprite = encode(&img, &opts);
    assert_eq!(sprite.form, vec![0xFF]);
    assert_eq!(sprite.color, vec![0x43]);
    assert_eq!(sprite.stats.multi_color_blocks(), 0);
}

#[test]
fn test_transparent_image() {
    let img = RgbaImage::from_pixel(16, 3, CLEAR);
    let opts = EncodeOptions {
        default_background: PaletteId::LIGHT_BLUE,
        ..Default::default()
    };
    let sprite = encode(&img, &opts);
    assert_eq!(sprite.form, vec![0x00; 6]);
    assert_eq!(sprite.color, vec![0xCC; 6]);
    assert_eq!(
        sprite.stats.pair_count(PaletteId::LIGHT_BLUE, PaletteId::LIGHT_BLUE),
        6
    );
}

#[test]
fn test_majority_color_becomes_background() {
    // 5 white, 3 red, laid out so the red pixels form 11001000
    let row = [RED, RED, WHITE, WHITE, RED, WHITE, WHITE, WHITE];
    let img = RgbaImage::from_fn(8, 1, |x, _| row[x as usize]);
    let sprite = encode(&img, &EncodeOptions::default());
    assert_eq!(sprite.form, vec![0xC8]);
    assert_eq!(
        unpack_color_byte(sprite.color[0]),
        (PaletteId::WHITE, PaletteId::RED)
    );
    assert_eq!(sprite.stats.multi_color_blocks(), 1);
}

#[test]
fn test_anti_aliased_edge() {
    // A red shape fading into white: the pinkish pixel's nearest palette
    // color is LIGHT_RED, yet it has to land on one of the two block colors.
    let row = [
        RED,
        RED,
        RED,
        Rgba([255, 110, 110, 255]),
        WHITE,
        WHITE,
        WHITE,
        WHITE,
    ];
    assert_eq!(closest_color(255, 110, 110), PaletteId::LIGHT_RED);
    let img = RgbaImage::from_fn(8, 1, |x, _| row[x as usize]);
    let sprite = encode(&img, &EncodeOptions::default());
    // WHITE (4) is background, RED (3) foreground; the edge pixel is closer to red
    assert_eq!(
        unpack_color_byte(sprite.color[0]),
        (PaletteId::WHITE, PaletteId::RED)
    );
    assert_eq!(sprite.form, vec![0xF0]);
}

#[test]
fn test_planes_are_row_major() {
    let img = RgbaImage::from_fn(16, 2, |x, y| match (x / 8, y) {
        (0, 0) => RED,
        (1, 0) => WHITE,
        (0, 1) => BLUE,
        _ => CLEAR,
    });
    let sprite = encode(&img, &EncodeOptions::default());
    assert_eq!(sprite.form, vec![0xFF, 0xFF, 0xFF, 0x00]);
    assert_eq!(sprite.color, vec![0x10, 0x70, 0x40, 0x00]);
}

#[test]
fn test_block_count_invariant() {
    let img = checkerboard(48, 17);
    let sprite = encode(&img, &EncodeOptions::default());
    let stats = &sprite.stats;
    assert_eq!(stats.total_blocks(), (48 / 8) * 17);
    assert!(stats.multi_color_blocks() <= stats.total_blocks());
    assert_eq!(stats.pairs().map(|(_, n)| n).sum::<usize>(), stats.total_blocks());
    assert_eq!(sprite.form.len(), 6 * 17);
    assert_eq!(sprite.color.len(), 6 * 17);
}

#[test]
fn test_encoding_is_deterministic() {
    let img = checkerboard(40, 25);
    let opts = EncodeOptions {
        default_background: PaletteId::GRAY,
        ..Default::default()
    };
    let a = encode(&img, &opts);
    let b = encode(&img, &opts);
    assert_eq!(a, b);
}

#[test]
fn test_truncate_versus_pad() {
    let img = RgbaImage::from_pixel(12, 2, RED);

    let truncated = encode(&img, &EncodeOptions::default());
    assert_eq!(truncated.width, 8);
    assert_eq!(truncated.bytes_per_line, 1);
    assert_eq!(truncated.form, vec![0xFF, 0xFF]);

    let padded = encode(
        &img,
        &EncodeOptions {
            width_policy: WidthPolicy::Pad,
            ..Default::default()
        },
    );
    assert_eq!(padded.width, 12);
    assert_eq!(padded.bytes_per_line, 2);
    assert_eq!(padded.form, vec![0xFF, 0xF0, 0xFF, 0xF0]);
    assert_eq!(padded.color, vec![0x10; 4]);
}

#[test]
fn test_buffer_size_mismatch() {
    let rgba = vec![0u8; 8 * 4 - 1];
    assert!(matches!(
        mo5_encode_default(&rgba, 8, 1),
        Err(Mo5Error::BufferSizeMismatch {
            expected: 32,
            actual: 31
        })
    ));
}

#[test]
fn test_c_source_matches_planes() {
    let img = RgbaImage::from_fn(16, 2, |x, y| if (x + y) % 2 == 0 { RED } else { BLUE });
    let sprite = encode(&img, &EncodeOptions::default());
    let src = render_c_source(
        &sprite,
        &CSourceOptions {
            name: "demo sprite".into(),
            source_file: "demo.png".into(),
        },
    )
    .unwrap();

    assert!(src.contains("unsigned char sprite_demo_sprite_form[4] = {"));
    assert!(src.contains("unsigned char sprite_demo_sprite_color[4] = {"));
    assert!(src.contains("// Size: 16x2 pixels (2 bytes x 2 lines)"));
    assert!(src.contains("//                        2, 2);"));
}
