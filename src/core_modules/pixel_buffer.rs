// THEORY:
// The `PixelBuffer` is the "dumb" output container of the renderer: a fixed-size
// raster of 16-bit RGB triples. Rows are stored bottom-up: row 0 is the bottom
// row of the finished image, the way plotter-style PNG writers address pixels.
// It knows how to store and hand out pixels and how to become an `image`
// buffer (top-down, as `image` expects), nothing more.
//
// The renderer does not talk to `PixelBuffer` directly but to the `RasterSink`
// trait: declared dimensions plus "plot one pixel". That is the whole contract an
// image encoder needs, so a caller can render straight into its own surface.

use crate::core_modules::color_map::color_map::Rgb16;
use image::{ImageBuffer, Rgb};

/// A write-only raster with fixed dimensions.
pub trait RasterSink {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// Sets the pixel at column `x`, row `y` (row 0 is the bottom of the image).
    fn plot(&mut self, x: u32, y: u32, rgb: Rgb16);
}

/// An owned 16-bit RGB raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgb16>,
}

impl PixelBuffer {
    /// Creates a black buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0; 3]; width as usize * height as usize],
        }
    }

    pub fn pixels(&self) -> &[Rgb16] {
        &self.pixels
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Rgb16> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(self.offset(x, y)).copied()
    }

    /// Iterates the buffer one row at a time, bottom row first.
    pub fn rows(&self) -> impl Iterator<Item = &[Rgb16]> {
        self.pixels.chunks(self.width.max(1) as usize)
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Converts into a top-down `image` buffer, ready for any of its encoders.
    pub fn into_image(self) -> ImageBuffer<Rgb<u16>, Vec<u16>> {
        let height = self.height;
        ImageBuffer::from_fn(self.width, height, |x, y| {
            Rgb(self.pixels[self.offset(x, height - 1 - y)])
        })
    }
}

impl RasterSink for PixelBuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn plot(&mut self, x: u32, y: u32, rgb: Rgb16) {
        debug_assert!(x < self.width && y < self.height, "plot outside raster");
        let offset = self.offset(x, y);
        self.pixels[offset] = rgb;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_is_black_and_sized() {
        let buffer = PixelBuffer::new(3, 2);
        assert_eq!(buffer.pixels().len(), 6);
        assert!(buffer.pixels().iter().all(|p| *p == [0, 0, 0]));
        assert_eq!(buffer.rows().count(), 2);
    }

    #[test]
    fn plot_and_get_use_bottom_up_rows() {
        let mut buffer = PixelBuffer::new(3, 2);
        buffer.plot(2, 1, [1, 2, 3]);
        assert_eq!(buffer.get(2, 1), Some([1, 2, 3]));
        assert_eq!(buffer.pixels()[5], [1, 2, 3]);
        assert_eq!(buffer.get(3, 0), None);
    }

    #[test]
    fn into_image_turns_rows_top_down() {
        let mut buffer = PixelBuffer::new(2, 3);
        buffer.plot(1, 0, [65535, 0, 7]);
        buffer.plot(0, 2, [1, 1, 1]);
        let image = buffer.into_image();
        assert_eq!(image.dimensions(), (2, 3));
        assert_eq!(image.get_pixel(1, 2).0, [65535, 0, 7]);
        assert_eq!(image.get_pixel(0, 0).0, [1, 1, 1]);
        assert_eq!(image.get_pixel(1, 0).0, [0, 0, 0]);
        assert_eq!(image.get_pixel(0, 1).0, [0, 0, 0]);
    }
}
