//! DrawPad Media Library
//!
//! Turns user-picked image files into normalized, web-safe encoded bytes
//! that can be stored on a board.

use drawpad_core::import::{ImportError, ImportedImage, MediaImporter};
use drawpad_core::item::{ImageData, ImageFormat};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder};
use std::io::Cursor;

/// JPEG quality used for opaque images.
pub const DEFAULT_JPEG_QUALITY: u8 = 80;

/// Re-encodes picked images into a consistent format.
///
/// The source is decoded and redrawn as 8-bit pixels at its original
/// resolution. Images with an alpha channel become PNG, everything else
/// becomes JPEG.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageNormalizer {
    jpeg_quality: u8,
}

impl Default for ImageNormalizer {
    fn default() -> Self {
        Self {
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl ImageNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different JPEG quality (clamped to 1..=100).
    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality.clamp(1, 100);
        self
    }

    pub fn jpeg_quality(&self) -> u8 {
        self.jpeg_quality
    }

    /// Decode, redraw and re-encode `raw`.
    pub fn normalize(&self, raw: &[u8]) -> Result<ImportedImage, ImportError> {
        if raw.is_empty() {
            return Err(ImportError::Empty);
        }
        let decoded = image::load_from_memory(raw).map_err(|e| ImportError::Decode(e.to_string()))?;
        let (width, height) = (decoded.width(), decoded.height());

        let (bytes, format) = if decoded.color().has_alpha() {
            (encode_png(&decoded)?, ImageFormat::Png)
        } else {
            (encode_jpeg(&decoded, self.jpeg_quality)?, ImageFormat::Jpeg)
        };
        log::debug!(
            "Normalized {width}x{height} image to {} ({} -> {} bytes)",
            format.mime_type(),
            raw.len(),
            bytes.len()
        );

        Ok(ImportedImage {
            data: ImageData::new(bytes),
            width,
            height,
            format,
        })
    }
}

impl MediaImporter for ImageNormalizer {
    fn import(&self, raw: &[u8]) -> Result<ImportedImage, ImportError> {
        self.normalize(raw)
    }
}

fn encode_png(image: &DynamicImage) -> Result<Vec<u8>, ImportError> {
    let rgba = image.to_rgba8();
    let mut buf = Cursor::new(Vec::new());
    PngEncoder::new(&mut buf)
        .write_image(rgba.as_raw(), rgba.width(), rgba.height(), ExtendedColorType::Rgba8)
        .map_err(|e| ImportError::Encode(format!("PNG encoding failed: {e}")))?;
    Ok(buf.into_inner())
}

fn encode_jpeg(image: &DynamicImage, quality: u8) -> Result<Vec<u8>, ImportError> {
    let rgb = image.to_rgb8();
    let mut buf = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buf, quality)
        .write_image(rgb.as_raw(), rgb.width(), rgb.height(), ExtendedColorType::Rgb8)
        .map_err(|e| ImportError::Encode(format!("JPEG encoding failed: {e}")))?;
    Ok(buf.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    fn encode(image: DynamicImage, format: image::ImageFormat) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        image.write_to(&mut out, format).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_opaque_image_becomes_jpeg() {
        let source = DynamicImage::ImageRgb8(RgbImage::from_pixel(64, 32, Rgb([200, 40, 40])));
        let raw = encode(source, image::ImageFormat::Png);

        let imported = ImageNormalizer::new().import(&raw).unwrap();
        assert_eq!(imported.format, ImageFormat::Jpeg);
        assert_eq!((imported.width, imported.height), (64, 32));
        assert_eq!(imported.data.format(), Some(ImageFormat::Jpeg));

        let round_trip = image::load_from_memory(imported.data.bytes()).unwrap();
        assert_eq!((round_trip.width(), round_trip.height()), (64, 32));
    }

    #[test]
    fn test_transparent_image_becomes_png() {
        let source = DynamicImage::ImageRgba8(RgbaImage::from_pixel(20, 50, Rgba([0, 0, 255, 128])));
        let raw = encode(source, image::ImageFormat::Png);

        let imported = ImageNormalizer::new().import(&raw).unwrap();
        assert_eq!(imported.format, ImageFormat::Png);
        assert_eq!(imported.data.format(), Some(ImageFormat::Png));

        let round_trip = image::load_from_memory(imported.data.bytes()).unwrap().to_rgba8();
        assert_eq!(round_trip.get_pixel(3, 3), &Rgba([0, 0, 255, 128]));
    }

    #[test]
    fn test_jpeg_input_is_reencoded() {
        let source = DynamicImage::ImageRgb8(RgbImage::from_pixel(16, 16, Rgb([10, 200, 10])));
        let raw = encode(source, image::ImageFormat::Jpeg);

        let imported = ImageNormalizer::new().with_jpeg_quality(50).import(&raw).unwrap();
        assert_eq!(imported.format, ImageFormat::Jpeg);
        assert_eq!((imported.width, imported.height), (16, 16));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(ImageNormalizer::new().import(&[]), Err(ImportError::Empty));
    }

    #[test]
    fn test_garbage_input() {
        let result = ImageNormalizer::new().import(b"definitely not an image");
        assert!(matches!(result, Err(ImportError::Decode(_))));
    }

    #[test]
    fn test_quality_is_clamped() {
        assert_eq!(ImageNormalizer::new().with_jpeg_quality(0).jpeg_quality(), 1);
        assert_eq!(ImageNormalizer::new().with_jpeg_quality(250).jpeg_quality(), 100);
        assert_eq!(ImageNormalizer::default().jpeg_quality(), DEFAULT_JPEG_QUALITY);
    }
}
