// THEORY:
// The `GridLayout` is the single source of truth for how a flat cell buffer maps
// onto a 2D world. Simulations usually pad the world with a border of "ghost"
// cells so that neighbour lookups never branch at the edges; those cells live in
// the buffer but are not part of the picture.
//
// Key architectural principles:
// 1.  **One convention**: the loader writes and the renderer reads through the same
//     layout, so the two can never disagree about where the renderable region is.
// 2.  **Full-grid addressing**: `width` and `height` always include the ghost
//     border, and `index(x, y)` is `y * width + x` over the full grid.
// 3.  **Validated once**: a layout whose renderable region would be empty is
//     rejected at construction, so downstream loops never underflow.

use crate::error::GridError;
use std::ops::Range;

/// Width of the ghost border, uniform on all four sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GhostWidth {
    /// Every cell in the buffer is renderable.
    #[default]
    None,
    /// A one-cell padding ring surrounds the renderable region.
    One,
}

impl GhostWidth {
    /// The number of cells the border occupies on each side.
    pub fn cells(self) -> u32 {
        match self {
            GhostWidth::None => 0,
            GhostWidth::One => 1,
        }
    }
}

impl From<bool> for GhostWidth {
    fn from(ghostcells: bool) -> Self {
        if ghostcells { GhostWidth::One } else { GhostWidth::None }
    }
}

impl TryFrom<u32> for GhostWidth {
    type Error = GridError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(GhostWidth::None),
            1 => Ok(GhostWidth::One),
            other => Err(GridError::UnsupportedGhostWidth(other)),
        }
    }
}

/// Dimensions and ghost border of a flat, row-major grid buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    /// Full width in cells, ghost columns included.
    width: u32,
    /// Full height in cells, ghost rows included.
    height: u32,
    ghost: GhostWidth,
}

impl GridLayout {
    pub fn new(width: u32, height: u32, ghost: GhostWidth) -> Result<Self, GridError> {
        let border = 2 * ghost.cells();
        if width <= border || height <= border {
            return Err(GridError::EmptyRegion { width, height, ghost: ghost.cells() });
        }
        Ok(Self { width, height, ghost })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn ghost(&self) -> GhostWidth {
        self.ghost
    }

    /// Number of cells in the full buffer, ghost cells included.
    pub fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn renderable_width(&self) -> u32 {
        self.width - 2 * self.ghost.cells()
    }

    pub fn renderable_height(&self) -> u32 {
        self.height - 2 * self.ghost.cells()
    }

    pub fn renderable_cells(&self) -> usize {
        self.renderable_width() as usize * self.renderable_height() as usize
    }

    /// Renderable columns, in full-grid coordinates.
    pub fn columns(&self) -> Range<u32> {
        self.ghost.cells()..self.width - self.ghost.cells()
    }

    /// Renderable rows, in full-grid coordinates.
    pub fn rows(&self) -> Range<u32> {
        self.ghost.cells()..self.height - self.ghost.cells()
    }

    /// Flat buffer index of `(x, y)` in full-grid coordinates.
    #[inline]
    pub fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Renderable positions in row-major order, top row first.
    pub fn renderable_positions(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.rows().flat_map(move |y| self.columns().map(move |x| (x, y)))
    }

    pub fn is_ghost(&self, x: u32, y: u32) -> bool {
        !(self.columns().contains(&x) && self.rows().contains(&y))
    }

    pub fn check_buffer(&self, len: usize) -> Result<(), GridError> {
        if len != self.len() {
            return Err(GridError::BufferSize { expected: self.len(), actual: len });
        }
        Ok(())
    }
}
