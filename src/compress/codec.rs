//! Decode an upload and re-encode it as baseline JPEG.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageError};
use thiserror::Error;

use super::Quality;

/// Errors from the decode/encode pipeline.
#[derive(Debug, Error)]
pub enum CompressError {
    /// The bytes are not an image in any enabled format.
    #[error("failed to decode upload: {0}")]
    Decode(#[source] ImageError),

    /// The JPEG encoder rejected the decoded image.
    #[error("failed to encode JPEG: {0}")]
    Encode(#[source] ImageError),
}

/// Decode image bytes, detecting the format from the content.
pub fn decode(bytes: &[u8]) -> Result<DynamicImage, CompressError> {
    image::load_from_memory(bytes).map_err(CompressError::Decode)
}

/// Encode `image` as JPEG at `quality`.
///
/// Greyscale sources stay single-channel. Everything else is flattened to
/// 8-bit RGB; alpha is dropped.
pub fn encode_jpeg(image: &DynamicImage, quality: Quality) -> Result<Vec<u8>, CompressError> {
    let mut buf = Cursor::new(Vec::new());
    let mut encoder = JpegEncoder::new_with_quality(&mut buf, quality.value());

    let result = match image {
        DynamicImage::ImageLuma8(gray) => encoder.encode_image(gray),
        DynamicImage::ImageLuma16(_) | DynamicImage::ImageLumaA8(_) | DynamicImage::ImageLumaA16(_) => {
            encoder.encode_image(&image.to_luma8())
        }
        _ => encoder.encode_image(&image.to_rgb8()),
    };
    result.map_err(CompressError::Encode)?;

    Ok(buf.into_inner())
}

/// Full pipeline: decode `bytes` and encode the result at `quality`.
pub fn recompress(bytes: &[u8], quality: Quality) -> Result<Vec<u8>, CompressError> {
    let image = decode(bytes)?;
    tracing::debug!(
        width = image.width(),
        height = image.height(),
        color = ?image.color(),
        "Decoded upload"
    );
    encode_jpeg(&image, quality)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};

    fn sample_rgb(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            let n = x.wrapping_mul(31) ^ y.wrapping_mul(17);
            Rgb([(x * 4) as u8, (y * 4) as u8, (n % 251) as u8])
        })
    }

    fn png_bytes(image: &DynamicImage) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        image.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    fn is_jpeg(bytes: &[u8]) -> bool {
        bytes.starts_with(&[0xFF, 0xD8]) && bytes.ends_with(&[0xFF, 0xD9])
    }

    #[test]
    fn test_recompress_png() {
        let source = DynamicImage::ImageRgb8(sample_rgb(64, 48));
        let jpeg = recompress(&png_bytes(&source), Quality::DEFAULT).unwrap();

        assert!(is_jpeg(&jpeg));
        let decoded = image::load_from_memory_with_format(&jpeg, ImageFormat::Jpeg).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (64, 48));
    }

    #[test]
    fn test_alpha_is_dropped() {
        let rgba = RgbaImage::from_pixel(16, 16, Rgba([200, 10, 10, 0]));
        let jpeg = encode_jpeg(&DynamicImage::ImageRgba8(rgba), Quality::DEFAULT).unwrap();

        let decoded = image::load_from_memory(&jpeg).unwrap();
        assert_eq!(decoded.color(), image::ColorType::Rgb8);
    }

    #[test]
    fn test_grayscale_stays_single_channel() {
        let gray = image::GrayImage::from_fn(16, 16, |x, _| image::Luma([(x * 16) as u8]));
        let jpeg = encode_jpeg(&DynamicImage::ImageLuma8(gray), Quality::DEFAULT).unwrap();

        let decoded = image::load_from_memory(&jpeg).unwrap();
        assert_eq!(decoded.color(), image::ColorType::L8);
    }

    #[test]
    fn test_wide_grayscale_is_narrowed_to_l8() {
        let gray_alpha = image::GrayAlphaImage::from_pixel(8, 8, image::LumaA([90, 10]));
        let wide = image::ImageBuffer::from_pixel(8, 8, image::Luma([40_000u16]));

        for source in [DynamicImage::ImageLumaA8(gray_alpha), DynamicImage::ImageLuma16(wide)] {
            let jpeg = encode_jpeg(&source, Quality::DEFAULT).unwrap();
            assert!(is_jpeg(&jpeg));
            let decoded = image::load_from_memory(&jpeg).unwrap();
            assert_eq!(decoded.color(), image::ColorType::L8);
        }
    }

    #[test]
    fn test_size_shrinks_with_quality() {
        let source = DynamicImage::ImageRgb8(sample_rgb(128, 128));
        let sizes: Vec<usize> = [100, 75, 50, 25, 1]
            .into_iter()
            .map(|q| encode_jpeg(&source, Quality::new(q).unwrap()).unwrap().len())
            .collect();

        for pair in sizes.windows(2) {
            assert!(pair[0] >= pair[1], "sizes not monotonic: {:?}", sizes);
        }
    }

    #[test]
    fn test_non_image_is_decode_error() {
        let err = recompress(b"just some text, not pixels", Quality::DEFAULT).unwrap_err();
        assert!(matches!(err, CompressError::Decode(_)));

        let truncated = &png_bytes(&DynamicImage::ImageRgb8(sample_rgb(8, 8)))[..20];
        assert!(matches!(decode(truncated), Err(CompressError::Decode(_))));
    }
}
