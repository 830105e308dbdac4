use image::DynamicImage;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use veo_types::encode_data_url;

use crate::error::PreprocessError;
use crate::source::{ProcessedImage, SourceImage};

/// Longest side, in pixels, an uploaded image is allowed to keep.
pub const MAX_IMAGE_SIDE: u32 = 1024;

/// JPEG quality (0.8 on the browser's 0–1 scale).
pub const JPEG_QUALITY: u8 = 80;

/// Scale `(width, height)` so that neither side exceeds `max_side`,
/// preserving the aspect ratio.
///
/// Images already within bounds are returned unchanged. Otherwise the longer
/// side becomes exactly `max_side` and the shorter one is rounded to the
/// nearest pixel (never below one).
pub fn fit_within(width: u32, height: u32, max_side: u32) -> (u32, u32) {
    if width <= max_side && height <= max_side {
        return (width, height);
    }
    let scale_side = |short: u32, long: u32| -> u32 {
        let scaled = (f64::from(short) * f64::from(max_side) / f64::from(long)).round();
        (scaled as u32).max(1)
    };
    if width >= height {
        (max_side, scale_side(height, width))
    } else {
        (scale_side(width, height), max_side)
    }
}

/// Decode, downscale and re-encode a single image.
pub fn process_image(source: &SourceImage) -> Result<ProcessedImage, PreprocessError> {
    let decoded =
        image::load_from_memory(&source.bytes).map_err(|e| PreprocessError::Decode {
            name: source.name.clone(),
            source: e,
        })?;

    let (width, height) = fit_within(decoded.width(), decoded.height(), MAX_IMAGE_SIDE);
    let resized = if (width, height) == (decoded.width(), decoded.height()) {
        decoded
    } else {
        decoded.resize_exact(width, height, FilterType::Triangle)
    };

    // JPEG has no alpha channel.
    let rgb = DynamicImage::ImageRgb8(resized.to_rgb8());
    let mut jpeg = Vec::new();
    rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY))
        .map_err(|e| PreprocessError::Encode {
            name: source.name.clone(),
            source: e,
        })?;

    Ok(ProcessedImage {
        name: source.name.clone(),
        width,
        height,
        data_url: encode_data_url("image/jpeg", &jpeg),
    })
}
