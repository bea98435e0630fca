//! png2mo5 - Convert images into Thomson MO5 sprites
//!
//! A command-line tool that turns an image into C form/color arrays for the
//! MO5 bitmap mode.

use anyhow::{Context, Result};
use clap::Parser;
use mo5_sprite::{
    mo5_encode, render_c_source, sanitize_identifier, CSourceOptions, EncodeOptions, PaletteId,
    WidthPolicy,
};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "png2mo5")]
#[command(author = "Mike Krüger <mkrueger@posteo.de>")]
#[command(version)]
#[command(
    about = "Convert an image into a Thomson MO5 sprite (2 colors per group of 8 pixels)",
    long_about = None
)]
#[command(after_help = "Examples:\n  png2mo5 my_sprite.png\n  png2mo5 hero.png --name hero --bg-color 4")]
struct Cli {
    /// Input image file (PNG, JPEG, GIF, BMP)
    input: PathBuf,

    /// Sprite name, may include a directory to write the source into
    #[arg(short, long)]
    name: Option<PathBuf>,

    /// Default background color (0-15)
    #[arg(short, long = "bg-color", default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=15))]
    bg_color: u8,

    /// Pad the last group of 8 pixels instead of truncating the width
    #[arg(long)]
    pad: bool,

    /// Output C file (overrides the path derived from --name)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the generated source to stdout instead of writing a file
    #[arg(long, conflicts_with = "output")]
    stdout: bool,
}

/// Picks the file the generated source is written to.
fn output_path(input: &Path, name: Option<&Path>, output: Option<&Path>) -> PathBuf {
    if let Some(output) = output {
        return output.to_path_buf();
    }
    match name {
        Some(name) => match name.extension().and_then(|e| e.to_str()) {
            Some("c") | Some("h") => name.to_path_buf(),
            _ => name.with_extension("c"),
        },
        None => {
            let stem = input.file_stem().unwrap_or_default().to_string_lossy();
            input.with_file_name(format!("{stem}_sprite_mc.c"))
        }
    }
}

/// The C identifier part of the sprite name.
fn sprite_name(input: &Path, name: Option<&Path>) -> String {
    let stem = name.unwrap_or(input).file_stem().unwrap_or_default();
    sanitize_identifier(&stem.to_string_lossy())
}

fn run(cli: Cli) -> Result<()> {
    let img = image::open(&cli.input)
        .with_context(|| format!("Failed to open '{}'", cli.input.display()))?;
    let rgba_img = img.to_rgba8();
    let (width, height) = rgba_img.dimensions();
    let pixels = rgba_img.into_raw();

    log::info!("Loaded '{}' ({}x{})", cli.input.display(), width, height);

    let opts = EncodeOptions {
        default_background: PaletteId::try_from(cli.bg_color)?,
        width_policy: if cli.pad {
            WidthPolicy::Pad
        } else {
            WidthPolicy::Truncate
        },
    };

    let sprite = mo5_encode(&pixels, width as usize, height as usize, &opts)
        .with_context(|| format!("Failed to convert '{}'", cli.input.display()))?;
    if sprite.width != width as usize {
        log::info!("Width adjusted from {} to {} pixels", width, sprite.width);
    }

    let name = sprite_name(&cli.input, cli.name.as_deref());
    let source_file = cli
        .input
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .into_owned();
    let code = render_c_source(
        &sprite,
        &CSourceOptions {
            name: name.clone(),
            source_file,
        },
    )?;

    let stats = &sprite.stats;
    log::info!("Arrays: sprite_{name}_form, sprite_{name}_color");
    log::info!(
        "Multi-color blocks: {}/{} ({:.1}%)",
        stats.multi_color_blocks(),
        stats.total_blocks(),
        stats.multi_color_percentage()
    );
    log::info!(
        "Usage: draw_sprite_multicolor(x, y, sprite_{name}_form, sprite_{name}_color, {}, {});",
        sprite.bytes_per_line,
        sprite.height
    );

    if cli.stdout {
        io::stdout().write_all(code.as_bytes())?;
        return Ok(());
    }

    let path = output_path(&cli.input, cli.name.as_deref(), cli.output.as_deref());
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create '{}'", parent.display()))?;
    }
    fs::write(&path, &code).with_context(|| format!("Failed to write '{}'", path.display()))?;
    log::info!("Written {} bytes to '{}'", code.len(), path.display());
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run(Cli::parse()) {
        log::error!("{err:#}");
        std::process::exit(1);
    }
}
