pub mod image_helper {
    use crate::core_modules::pixel_buffer::PixelBuffer;
    use image::codecs::png::PngEncoder;
    use std::io::BufWriter;
    use std::path::Path;

    /// Encodes the raster as a 16-bit RGB PNG byte stream.
    pub fn encode_png(buffer: PixelBuffer) -> Result<Vec<u8>, image::error::ImageError> {
        let mut png = Vec::new();
        buffer.into_image().write_with_encoder(PngEncoder::new(&mut png))?;
        Ok(png)
    }

    /// Writes the raster to `path` as a 16-bit RGB PNG file.
    pub fn save(path: impl AsRef<Path>, buffer: PixelBuffer) -> Result<(), image::error::ImageError> {
        let output = BufWriter::new(std::fs::File::create(path)?);
        let encoder = PngEncoder::new(output);

        buffer.into_image().write_with_encoder(encoder)?;

        Ok(())
    }
}
