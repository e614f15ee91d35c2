// THEORY:
// The `Renderer` is where the grid becomes a picture. It walks the renderable
// region of the grid, asks the color map for each cell's color, and paints a
// `scale x scale` block of that color into a raster.
//
// Key architectural principles:
// 1.  **Ghost-aware walk**: iteration goes through `GridLayout`, the same layout
//     the loader wrote through. Ghost cells are never read.
// 2.  **Vertical flip**: grid row `y` grows downward in memory but sinks address
//     rows bottom-up (row 0 is the bottom of the image). The first renderable row
//     therefore lands in the highest sink rows, which is the top of the picture.
//     Columns keep their left-to-right order.
// 3.  **Every pixel once**: each output pixel belongs to exactly one cell block, so
//     the sink sees exactly `width * height` plots.
// 4.  **No value checks by default**: out-of-domain values get whatever the color
//     map does with them. `render_strict` is the checked variant.

pub mod renderer {
    use crate::core_modules::cell::cell::CellValue;
    use crate::core_modules::color_map::color_map::ColorPolicy;
    use crate::core_modules::grid_layout::GridLayout;
    use crate::core_modules::pixel_buffer::{PixelBuffer, RasterSink};
    use crate::error::RenderError;
    use log::debug;

    /// Output raster size for `layout` at `scale`, if it is addressable.
    pub fn output_dimensions(layout: &GridLayout, scale: u32) -> Result<(u32, u32), RenderError> {
        let too_large = || RenderError::RasterTooLarge { scale };
        let width = layout.renderable_width().checked_mul(scale).ok_or_else(too_large)?;
        let height = layout.renderable_height().checked_mul(scale).ok_or_else(too_large)?;
        (width as usize).checked_mul(height as usize).ok_or_else(too_large)?;
        Ok((width, height))
    }

    /// Renders the grid into a fresh `PixelBuffer`.
    pub fn render<T, P>(
        grid: &[T],
        layout: &GridLayout,
        policy: &P,
        scale: u32,
    ) -> Result<PixelBuffer, RenderError>
    where
        T: CellValue,
        P: ColorPolicy + ?Sized,
    {
        if scale == 0 {
            return Err(RenderError::InvalidScale);
        }
        let (width, height) = output_dimensions(layout, scale)?;
        let mut buffer = PixelBuffer::new(width, height);
        render_into(grid, layout, policy, scale, &mut buffer)?;
        Ok(buffer)
    }

    /// Like `render`, but refuses grids holding values outside the color map's domain.
    pub fn render_strict<T, P>(
        grid: &[T],
        layout: &GridLayout,
        policy: &P,
        scale: u32,
    ) -> Result<PixelBuffer, RenderError>
    where
        T: CellValue,
        P: ColorPolicy + ?Sized,
    {
        layout.check_buffer(grid.len())?;
        if let Some(domain) = policy.domain() {
            for (x, y) in layout.renderable_positions() {
                let value = grid[layout.index(x, y)].to_i64();
                if !domain.contains(&value) {
                    return Err(RenderError::PolicyDomainViolation { x, y, value });
                }
            }
        }
        render(grid, layout, policy, scale)
    }

    /// Paints the grid into any raster sink sized `output_dimensions(layout, scale)`.
    pub fn render_into<T, P, S>(
        grid: &[T],
        layout: &GridLayout,
        policy: &P,
        scale: u32,
        sink: &mut S,
    ) -> Result<(), RenderError>
    where
        T: CellValue,
        P: ColorPolicy + ?Sized,
        S: RasterSink + ?Sized,
    {
        if scale == 0 {
            return Err(RenderError::InvalidScale);
        }
        layout.check_buffer(grid.len())?;

        let expected = output_dimensions(layout, scale)?;
        let actual = (sink.width(), sink.height());
        if expected != actual {
            return Err(RenderError::SinkSize { expected, actual });
        }

        let ghost = layout.ghost().cells();
        let out_height = actual.1;

        for (x, y) in layout.renderable_positions() {
            let rgb = policy.rgb(grid[layout.index(x, y)].to_i64());
            let block_x = (x - ghost) * scale;
            let block_y = (y - ghost) * scale;

            for scale_y in 0..scale {
                let out_y = out_height - 1 - (block_y + scale_y);
                for scale_x in 0..scale {
                    sink.plot(block_x + scale_x, out_y, rgb);
                }
            }
        }

        debug!(
            "rendered {}x{} cells into {}x{} pixels",
            layout.renderable_width(),
            layout.renderable_height(),
            actual.0,
            actual.1
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::renderer::*;
    use crate::core_modules::color_map::color_map::{ColorMap, ColorPolicy, Rgb16};
    use crate::core_modules::grid_layout::{GhostWidth, GridLayout};
    use crate::core_modules::pixel_buffer::RasterSink;
    use crate::error::{GridError, RenderError};
    use std::collections::HashMap;
    use test_log::test;

    const WHITE: Rgb16 = [65535, 65535, 65535];
    const BLACK: Rgb16 = [0, 0, 0];

    /// Sink that records every plot, to check coverage.
    struct CountingSink {
        width: u32,
        height: u32,
        plots: HashMap<(u32, u32), usize>,
    }

    impl RasterSink for CountingSink {
        fn width(&self) -> u32 {
            self.width
        }
        fn height(&self) -> u32 {
            self.height
        }
        fn plot(&mut self, x: u32, y: u32, _rgb: Rgb16) {
            *self.plots.entry((x, y)).or_default() += 1;
        }
    }

    #[test]
    fn plus_sign_is_flipped_vertically() {
        let layout = GridLayout::new(3, 3, GhostWidth::None).unwrap();
        // Asymmetric top row so the flip is visible.
        let grid = [1u8, 1, 0, 1, 1, 1, 0, 1, 0];
        let buffer = render(&grid, &layout, &ColorMap::BlackWhite, 1).unwrap();

        let rows: Vec<Vec<Rgb16>> = buffer.rows().map(<[Rgb16]>::to_vec).collect();
        assert_eq!(rows[0], vec![BLACK, WHITE, BLACK]);
        assert_eq!(rows[1], vec![WHITE, WHITE, WHITE]);
        assert_eq!(rows[2], vec![WHITE, WHITE, BLACK]);
    }

    #[test]
    fn ghost_cells_never_reach_the_image() {
        let layout = GridLayout::new(5, 4, GhostWidth::One).unwrap();
        let mut grid = vec![8u8; layout.len()];
        for (x, y) in layout.renderable_positions() {
            grid[layout.index(x, y)] = 0;
        }
        let buffer = render(&grid, &layout, &ColorMap::BlackWhite, 2).unwrap();
        assert_eq!((buffer.width(), buffer.height()), (6, 4));
        assert!(buffer.pixels().iter().all(|p| *p == BLACK));
    }

    #[test]
    fn scaled_cells_become_uniform_blocks() {
        let layout = GridLayout::new(2, 2, GhostWidth::None).unwrap();
        let grid = [0i32, 1, 2, 3];
        let map = ColorMap::CategoricalHeat;
        let scale = 3;
        let buffer = render(&grid, &layout, &map, scale).unwrap();
        assert_eq!((buffer.width(), buffer.height()), (6, 6));

        for cell_y in 0..2u32 {
            for cell_x in 0..2u32 {
                let expected = map.rgb(grid[(cell_y * 2 + cell_x) as usize] as i64);
                let band = (1 - cell_y) * scale;
                for dy in 0..scale {
                    for dx in 0..scale {
                        assert_eq!(buffer.get(cell_x * scale + dx, band + dy), Some(expected));
                    }
                }
            }
        }
    }

    #[test]
    fn first_row_lands_in_last_band() {
        let layout = GridLayout::new(3, 4, GhostWidth::One).unwrap();
        let mut grid = vec![0u8; layout.len()];
        grid[layout.index(1, 1)] = 1;
        let buffer = render(&grid, &layout, &ColorMap::BlackWhite, 2).unwrap();
        assert_eq!((buffer.width(), buffer.height()), (2, 4));
        for y in 2..4 {
            assert_eq!(buffer.get(0, y), Some(WHITE));
            assert_eq!(buffer.get(1, y), Some(WHITE));
        }
        for y in 0..2 {
            assert_eq!(buffer.get(0, y), Some(BLACK));
        }
    }

    #[test]
    fn every_pixel_is_plotted_exactly_once() {
        let layout = GridLayout::new(6, 5, GhostWidth::One).unwrap();
        let grid = vec![3u16; layout.len()];
        let scale = 3;
        let (width, height) = output_dimensions(&layout, scale).unwrap();
        let mut sink = CountingSink { width, height, plots: HashMap::new() };
        render_into(&grid, &layout, &ColorMap::Procedural, scale, &mut sink).unwrap();
        assert_eq!(sink.plots.len(), (width * height) as usize);
        assert!(sink.plots.values().all(|&count| count == 1));
    }

    #[test]
    fn policies_can_be_chosen_at_runtime() {
        let layout = GridLayout::new(1, 1, GhostWidth::None).unwrap();
        let policies: Vec<Box<dyn ColorPolicy>> =
            vec![Box::new(ColorMap::Heat), Box::new(ColorMap::Procedural)];
        let rendered: Vec<_> = policies
            .iter()
            .map(|policy| render(&[8u8], &layout, policy.as_ref(), 1).unwrap().pixels()[0])
            .collect();
        assert_eq!(rendered[0], [65535, 0, 0]);
        assert_eq!(rendered[1], [6500, 14408, 11401]);
    }

    #[test]
    fn zero_scale_is_rejected() {
        let layout = GridLayout::new(2, 2, GhostWidth::None).unwrap();
        assert_eq!(
            render(&[0u8; 4], &layout, &ColorMap::BlackWhite, 0),
            Err(RenderError::InvalidScale)
        );
    }

    #[test]
    fn oversized_scale_is_rejected_before_allocating() {
        let layout = GridLayout::new(2, 2, GhostWidth::None).unwrap();
        let scale = 1 << 31;
        assert_eq!(
            output_dimensions(&layout, scale),
            Err(RenderError::RasterTooLarge { scale })
        );
        assert_eq!(
            render(&[0u8; 4], &layout, &ColorMap::BlackWhite, scale),
            Err(RenderError::RasterTooLarge { scale })
        );
        let mut sink = CountingSink { width: 0, height: 0, plots: HashMap::new() };
        assert_eq!(
            render_into(&[0u8; 4], &layout, &ColorMap::BlackWhite, scale, &mut sink),
            Err(RenderError::RasterTooLarge { scale })
        );
        assert_eq!(output_dimensions(&layout, 1 << 30), Ok((1 << 31, 1 << 31)));
    }

    #[test]
    fn buffer_and_sink_sizes_are_checked() {
        let layout = GridLayout::new(2, 2, GhostWidth::None).unwrap();
        assert_eq!(
            render(&[0u8; 3], &layout, &ColorMap::BlackWhite, 1),
            Err(RenderError::Grid(GridError::BufferSize { expected: 4, actual: 3 }))
        );
        let mut sink = CountingSink { width: 3, height: 2, plots: HashMap::new() };
        assert_eq!(
            render_into(&[0u8; 4], &layout, &ColorMap::BlackWhite, 1, &mut sink),
            Err(RenderError::SinkSize { expected: (2, 2), actual: (3, 2) })
        );
        assert!(sink.plots.is_empty());
    }

    #[test]
    fn strict_render_reports_out_of_domain_cells() {
        let layout = GridLayout::new(4, 3, GhostWidth::One).unwrap();
        let mut grid = vec![42i32; layout.len()];
        grid[layout.index(1, 1)] = 3;
        grid[layout.index(2, 1)] = 9;
        assert_eq!(
            render_strict(&grid, &layout, &ColorMap::CategoricalHeat, 1),
            Err(RenderError::PolicyDomainViolation { x: 2, y: 1, value: 9 })
        );

        grid[layout.index(2, 1)] = 8;
        assert!(render_strict(&grid, &layout, &ColorMap::CategoricalHeat, 1).is_ok());
        assert!(render_strict(&grid, &layout, &ColorMap::Procedural, 1).is_ok());
    }
}
