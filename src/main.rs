// Example runner: loads a grid description and writes it out as a PNG.
//
// Usage: gol_raster <input> <width> <height> <output.png> [scale] [ghost] [color-map]
//
// `width` and `height` are the renderable size; with `ghost` set to 1 the grid
// buffer gets a one-cell border around it.

use anyhow::{Context, bail};
use gol_raster::{ColorMap, GhostWidth, RenderConfig, RenderPipeline};
use log::info;
use std::env;

fn parse<T: std::str::FromStr>(args: &[String], index: usize, name: &str, default: Option<T>) -> anyhow::Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match (args.get(index), default) {
        (Some(raw), _) => raw.parse().with_context(|| format!("invalid {name} {raw:?}")),
        (None, Some(default)) => Ok(default),
        (None, None) => bail!("missing {name}"),
    }
}

/// Full grid extent for a renderable extent plus the ghost border on both sides.
fn with_border(size: u32, ghost: GhostWidth, name: &str) -> anyhow::Result<u32> {
    size.checked_add(2 * ghost.cells())
        .with_context(|| format!("{name} {size} too large for a ghost border"))
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 5 {
        println!("Usage: gol_raster <input> <width> <height> <output.png> [scale] [ghost] [color-map]");
        return Ok(());
    }
    let input_path = &args[1];
    let output_path = &args[4];

    let width: u32 = parse(&args, 2, "width", None)?;
    let height: u32 = parse(&args, 3, "height", None)?;
    let scale: u32 = parse(&args, 5, "scale", Some(1))?;
    let ghost = GhostWidth::try_from(parse::<u32>(&args, 6, "ghost width", Some(0))?)?;
    let color_map: ColorMap = parse(&args, 7, "color map", Some(ColorMap::BlackWhite))?;

    let config = RenderConfig {
        width: with_border(width, ghost, "width")?,
        height: with_border(height, ghost, "height")?,
        ghost,
        scale,
        color_map,
        strict: false,
    };
    let pipeline = RenderPipeline::new(config)?;

    let mut grid: Vec<u8> = pipeline.empty_grid();
    let cells = pipeline.load(input_path, &mut grid)?;
    info!("loaded {cells} cells from {input_path}");

    pipeline
        .save_png(&grid, output_path)
        .with_context(|| format!("writing {output_path}"))?;
    info!("wrote {output_path}");
    Ok(())
}
