// THEORY:
// This file is the main entry point for the `gol_raster` library crate.
//
// The public surface is the `RenderPipeline` with its `RenderConfig`, plus the
// building blocks it is made of for callers that want to drive them directly:
// the color maps, the ghost-aware `GridLayout`, the text loader, the renderer
// and the notebook display channel.

pub mod core_modules;
pub mod display;
pub mod error;
pub mod pipeline;

pub use core_modules::cell::cell::CellValue;
pub use core_modules::color_map::color_map::{ColorMap, ColorPolicy, Rgb16};
pub use core_modules::grid_layout::{GhostWidth, GridLayout};
pub use error::{ConfigError, GridError, LoadError, PipelineError, RenderError};
pub use pipeline::{PixelBuffer, RasterSink, RenderConfig, RenderPipeline};
