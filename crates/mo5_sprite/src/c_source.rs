//! Renders an encoded [`Sprite`] as C source for MO5 projects.
//!
//! The output declares `sprite_<name>_form` and `sprite_<name>_color`
//! arrays and a `draw_sprite_multicolor` routine that copies them into the
//! attribute and bitmap banks of video memory.

use crate::encoder::Sprite;
use crate::palette::PaletteId;
use crate::{Mo5Error, Result};
use std::fmt::{self, Write};

const RULE: &str = "// =============================================";

const DRAW_ROUTINE: &str = "\
void draw_sprite_multicolor(int tx, int ty,
                            unsigned char *form_data,
                            unsigned char *color_data,
                            int width_bytes, int height) {
    unsigned int offset;
    int i, j;

    for (i = 0; i < height; i++) {
        offset = row_offsets[ty + i] + tx;

        // 1. Colors (attribute bank)
        *PRC &= ~0x01;
        for (j = 0; j < width_bytes; j++) {
            VRAM[offset + j] = color_data[i * width_bytes + j];
        }

        // 2. Forms (bitmap bank)
        *PRC |= 0x01;
        for (j = 0; j < width_bytes; j++) {
            VRAM[offset + j] = form_data[i * width_bytes + j];
        }
    }
}
";

/// Naming used in the generated source.
#[derive(Clone, Debug, Default)]
pub struct CSourceOptions {
    /// Sprite name, sanitized into a C identifier.
    pub name: String,
    /// File name of the source image, shown in the header comment.
    pub source_file: String,
}

/// Replaces every character that can't appear in a C identifier with `_`.
pub fn sanitize_identifier(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

fn color_macro(id: PaletteId) -> String {
    format!("C_{}", id.entry().name)
}

fn write_bytes(out: &mut String, bytes: &[u8]) -> fmt::Result {
    out.push_str("    ");
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write!(out, "0x{b:02X}")?;
    }
    Ok(())
}

fn row_visual(sprite: &Sprite, y: usize) -> String {
    let row = sprite.form_row(y);
    (0..sprite.width)
        .map(|x| {
            if row[x / 8] & (0x80 >> (x % 8)) != 0 {
                '#'
            } else {
                '-'
            }
        })
        .collect()
}

/// Renders `sprite` as a C translation unit.
pub fn render_c_source(sprite: &Sprite, opts: &CSourceOptions) -> Result<String> {
    let name = sanitize_identifier(&opts.name);
    if name.is_empty() {
        return Err(Mo5Error::InvalidName(opts.name.clone()));
    }
    let mut out = String::new();
    // Writing into a String can't fail.
    let _ = write_source(&mut out, sprite, &name, &opts.source_file);
    Ok(out)
}

fn write_source(out: &mut String, sprite: &Sprite, name: &str, source_file: &str) -> fmt::Result {
    let size = sprite.plane_len();
    let last = sprite.height.saturating_sub(1);

    writeln!(out, "{RULE}")?;
    writeln!(out, "// Sprite: {name}")?;
    writeln!(out, "// Source: {source_file}")?;
    writeln!(
        out,
        "// Size: {}x{} pixels ({} bytes x {} lines)",
        sprite.width, sprite.height, sprite.bytes_per_line, sprite.height
    )?;
    writeln!(out, "// Format: 1 byte = 8 pixels (1 bit/pixel)")?;
    writeln!(out, "// Constraint: 2 colors per group of 8 pixels")?;
    writeln!(out, "{RULE}\n")?;

    writeln!(out, "// FORM data (bitmap: 1=foreground, 0=background)")?;
    writeln!(out, "unsigned char sprite_{name}_form[{size}] = {{")?;
    for y in 0..sprite.height {
        write_bytes(out, sprite.form_row(y))?;
        if y < last {
            out.push(',');
        }
        writeln!(out, "  // {y}  {}", row_visual(sprite, y))?;
    }
    writeln!(out, "}};\n")?;

    writeln!(out, "// COLOR data (attributes per group of 8 pixels)")?;
    writeln!(out, "// Format: FFFFBBBB (foreground bits 4-7, background bits 0-3)")?;
    writeln!(out, "unsigned char sprite_{name}_color[{size}] = {{")?;
    for y in 0..sprite.height {
        write_bytes(out, sprite.color_row(y))?;
        if y < last {
            out.push(',');
        }
        writeln!(out, "  // {y}")?;
    }
    writeln!(out, "}};\n")?;

    writeln!(out, "// Total size: {size} bytes per array")?;
    let stats = &sprite.stats;
    if stats.total_blocks() > 0 {
        writeln!(
            out,
            "// Multi-color blocks: {} / {} ({:.1}%)\n",
            stats.multi_color_blocks(),
            stats.total_blocks(),
            stats.multi_color_percentage()
        )?;
        writeln!(out, "// Color combinations used:")?;
        for ((bg, fg), count) in stats.pairs() {
            writeln!(
                out,
                "//   Background={}, Foreground={} : {count} blocks of 8 pixels",
                color_macro(bg),
                color_macro(fg)
            )?;
        }
    }
    out.push('\n');

    writeln!(out, "// USAGE:")?;
    writeln!(out, "// draw_sprite_multicolor(x, y, sprite_{name}_form,")?;
    writeln!(out, "//                        sprite_{name}_color,")?;
    writeln!(
        out,
        "//                        {}, {});\n",
        sprite.bytes_per_line, sprite.height
    )?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "// GENERIC DRAW ROUTINE")?;
    writeln!(out, "{RULE}\n")?;
    out.push_str(DRAW_ROUTINE);
    Ok(())
}
