// THEORY:
// The `pipeline` module is the top-level API of the crate. It ties the layers
// together (text loader, renderer, PNG encoder, notebook display) behind one
// configured object, so a caller only deals with a `RenderConfig` and a grid.
//
// The grid buffer itself always stays with the caller: the pipeline borrows it
// for a load or a render and never keeps it.

use crate::core_modules::cell::cell::CellValue;
use crate::core_modules::color_map::color_map::{ColorMap, ColorPolicy};
use crate::core_modules::grid_layout::{GhostWidth, GridLayout};
use crate::core_modules::input_reader::input_reader;
use crate::core_modules::renderer::renderer;
use crate::core_modules::utils::image_helper::image_helper;
use crate::display::{self, DisplayChannel};
use crate::error::{ConfigError, PipelineError};
use log::debug;
use std::path::Path;

// Re-export key data structures for the public API.
pub use crate::core_modules::pixel_buffer::{PixelBuffer, RasterSink};

/// Configuration for the RenderPipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Full grid width in cells, ghost columns included.
    pub width: u32,
    /// Full grid height in cells, ghost rows included.
    pub height: u32,
    pub ghost: GhostWidth,
    /// Edge length in pixels of the block each cell becomes.
    pub scale: u32,
    pub color_map: ColorMap,
    /// Reject cells outside the color map's domain instead of clamping them.
    pub strict: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 64,
            height: 64,
            ghost: GhostWidth::None,
            scale: 1,
            color_map: ColorMap::default(),
            strict: false,
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> Result<GridLayout, ConfigError> {
        if self.scale == 0 {
            return Err(ConfigError::InvalidScale);
        }
        let layout = GridLayout::new(self.width, self.height, self.ghost)?;
        renderer::output_dimensions(&layout, self.scale)
            .map_err(|_| ConfigError::RasterTooLarge { scale: self.scale })?;
        Ok(layout)
    }
}

/// Renders one grid to PNG bytes in a single call.
pub fn generate_png<T, P>(
    grid: &[T],
    layout: &GridLayout,
    policy: &P,
    scale: u32,
) -> Result<Vec<u8>, PipelineError>
where
    T: CellValue,
    P: ColorPolicy + ?Sized,
{
    let buffer = renderer::render(grid, layout, policy, scale)?;
    Ok(image_helper::encode_png(buffer)?)
}

/// The main, top-level struct of the crate.
#[derive(Debug, Clone)]
pub struct RenderPipeline {
    config: RenderConfig,
    layout: GridLayout,
}

impl RenderPipeline {
    pub fn new(config: RenderConfig) -> Result<Self, PipelineError> {
        let layout = config.validate()?;
        debug!(
            "pipeline for {}x{} grid ({:?} ghost), scale {}, {:?}",
            config.width, config.height, config.ghost, config.scale, config.color_map
        );
        Ok(Self { config, layout })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// A zeroed grid buffer sized for this pipeline.
    pub fn empty_grid<T: CellValue>(&self) -> Vec<T> {
        vec![T::from_alive(false); self.layout.len()]
    }

    /// Loads a grid file into `grid`. Returns the number of cells written.
    pub fn load<T: CellValue>(&self, path: impl AsRef<Path>, grid: &mut [T]) -> Result<usize, PipelineError> {
        Ok(input_reader::read_input(path, grid, &self.layout)?)
    }

    pub fn render<T: CellValue>(&self, grid: &[T]) -> Result<PixelBuffer, PipelineError> {
        let (layout, map, scale) = (&self.layout, &self.config.color_map, self.config.scale);
        let buffer = if self.config.strict {
            renderer::render_strict(grid, layout, map, scale)?
        } else {
            renderer::render(grid, layout, map, scale)?
        };
        Ok(buffer)
    }

    pub fn generate_png<T: CellValue>(&self, grid: &[T]) -> Result<Vec<u8>, PipelineError> {
        Ok(image_helper::encode_png(self.render(grid)?)?)
    }

    pub fn save_png<T: CellValue>(&self, grid: &[T], path: impl AsRef<Path>) -> Result<(), PipelineError> {
        Ok(image_helper::save(path, self.render(grid)?)?)
    }

    /// Renders the grid and publishes it on a notebook display channel.
    pub fn display<T, C>(&self, grid: &[T], channel: &mut C, clear_output: bool) -> Result<(), PipelineError>
    where
        T: CellValue,
        C: DisplayChannel + ?Sized,
    {
        let png = self.generate_png(grid)?;
        display::display_image(channel, &png, clear_output);
        Ok(())
    }
}
