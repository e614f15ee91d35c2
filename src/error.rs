use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Layout and buffer-shape errors shared by the loader and the renderer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("a {width}x{height} grid has no renderable cells with a ghost border of {ghost}")]
    EmptyRegion { width: u32, height: u32, ghost: u32 },
    #[error("unsupported ghost border width {0}, expected 0 or 1")]
    UnsupportedGhostWidth(u32),
    #[error("grid buffer holds {actual} cells, layout needs {expected}")]
    BufferSize { expected: usize, actual: usize },
}

/// Failures while reading a grid from its text description.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("can't open file {}", path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("too many elements in file {}", path.display())]
    TooManyTokens { path: PathBuf },
    #[error("failed reading {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Failures while turning a grid into pixels.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error("scale must be at least 1")]
    InvalidScale,
    #[error("scale {scale} makes the raster too large to address")]
    RasterTooLarge { scale: u32 },
    #[error("raster is {actual:?} pixels, grid renders to {expected:?}")]
    SinkSize { expected: (u32, u32), actual: (u32, u32) },
    #[error("cell ({x}, {y}) holds {value}, outside the color map's domain")]
    PolicyDomainViolation { x: u32, y: u32, value: i64 },
}

/// Invalid `RenderConfig` values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown color map {0:?}")]
    UnknownColorMap(String),
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error("scale must be at least 1")]
    InvalidScale,
    #[error("scale {scale} makes the raster too large to address")]
    RasterTooLarge { scale: u32 },
}

/// Any failure of the top-level `RenderPipeline`.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}
