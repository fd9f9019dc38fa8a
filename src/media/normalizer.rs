// Image normalizer
//
// decode base64 -> parse -> RGB -> fit within bounds -> JPEG

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, RgbImage};
use thiserror::Error;

/// MIME type of every normalized image
pub const NORMALIZED_MIME: &str = "image/jpeg";

/// Longest side allowed after normalization
pub const MAX_DIMENSION: u32 = 1024;

/// JPEG quality used for re-encoding
pub const JPEG_QUALITY: u8 = 85;

/// Hard ceiling on the encoded image size (10 MiB)
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Failures raised while normalizing an image payload
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MediaError {
    #[error("invalid image: {0}")]
    InvalidImage(String),

    #[error("image is {size} bytes, limit is {limit} bytes")]
    ImageTooLarge { size: usize, limit: usize },
}

/// Bounds applied to every normalized image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaPolicy {
    pub max_dimension: u32,
    pub jpeg_quality: u8,
    pub max_bytes: usize,
}

impl Default for MediaPolicy {
    fn default() -> Self {
        Self {
            max_dimension: MAX_DIMENSION,
            jpeg_quality: JPEG_QUALITY,
            max_bytes: MAX_IMAGE_BYTES,
        }
    }
}

/// A decoded, bounded, re-encoded JPEG ready for backend submission.
///
/// Only the normalizer constructs these, so width and height are always
/// within the policy's `max_dimension`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedImage {
    bytes: Vec<u8>,
    width: u32,
    height: u32,
}

impl NormalizedImage {
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn mime(&self) -> &'static str {
        NORMALIZED_MIME
    }

    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }

    /// Encode as a `data:` URL for inline submission
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", NORMALIZED_MIME, BASE64.encode(&self.bytes))
    }
}

/// Stateless image normalizer, configured once at startup
#[derive(Debug, Clone, Default)]
pub struct MediaNormalizer {
    policy: MediaPolicy,
}

impl MediaNormalizer {
    pub fn new(policy: MediaPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &MediaPolicy {
        &self.policy
    }

    /// Decode, validate and re-encode an image payload.
    ///
    /// Accepts plain base64 or a data URL. The byte ceiling is not checked
    /// here; callers run [`MediaNormalizer::enforce_size_limit`] on the result.
    pub fn normalize(&self, encoded: &str) -> Result<NormalizedImage, MediaError> {
        let payload = strip_data_url_prefix(encoded);
        let compact: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();

        let raw = BASE64
            .decode(compact.as_bytes())
            .map_err(|e| MediaError::InvalidImage(format!("base64 decode failed: {}", e)))?;

        let decoded = image::load_from_memory(&raw)
            .map_err(|e| MediaError::InvalidImage(format!("unreadable image data: {}", e)))?;

        let rgb = match decoded {
            DynamicImage::ImageRgb8(img) => img,
            other => other.to_rgb8(),
        };

        let rgb = self.fit(rgb);
        let (width, height) = rgb.dimensions();

        let mut bytes = Vec::new();
        JpegEncoder::new_with_quality(&mut bytes, self.policy.jpeg_quality)
            .encode_image(&rgb)
            .map_err(|e| MediaError::InvalidImage(format!("re-encode failed: {}", e)))?;

        tracing::debug!(
            width,
            height,
            size_bytes = bytes.len(),
            "Normalized image payload"
        );

        Ok(NormalizedImage {
            bytes,
            width,
            height,
        })
    }

    /// Reject normalized images above the byte ceiling
    pub fn enforce_size_limit(&self, image: &NormalizedImage) -> Result<(), MediaError> {
        if image.size_bytes() > self.policy.max_bytes {
            return Err(MediaError::ImageTooLarge {
                size: image.size_bytes(),
                limit: self.policy.max_bytes,
            });
        }
        Ok(())
    }

    /// Normalize on the blocking pool, then apply the byte ceiling
    pub async fn prepare(&self, encoded: String) -> Result<NormalizedImage, MediaError> {
        let normalizer = self.clone();
        let image = tokio::task::spawn_blocking(move || normalizer.normalize(&encoded))
            .await
            .map_err(|e| MediaError::InvalidImage(format!("image worker failed: {}", e)))??;

        self.enforce_size_limit(&image)?;
        Ok(image)
    }

    fn fit(&self, img: RgbImage) -> RgbImage {
        let (width, height) = img.dimensions();
        let (target_w, target_h) = fit_within(width, height, self.policy.max_dimension);
        if (target_w, target_h) == (width, height) {
            return img;
        }
        image::imageops::resize(&img, target_w, target_h, FilterType::Lanczos3)
    }
}

/// Drop everything up to and including the first comma (`data:image/png;base64,`)
fn strip_data_url_prefix(encoded: &str) -> &str {
    match encoded.split_once(',') {
        Some((_, rest)) => rest,
        None => encoded,
    }
}

/// Dimensions scaled so the longer side equals `max`, aspect ratio preserved.
/// Images already within bounds are returned unchanged.
pub(crate) fn fit_within(width: u32, height: u32, max: u32) -> (u32, u32) {
    if width <= max && height <= max {
        return (width, height);
    }

    let scale = |short: u32, long: u32| -> u32 {
        ((short as f64 * max as f64 / long as f64).round() as u32).clamp(1, max)
    };

    if width >= height {
        (max, scale(height, width))
    } else {
        (scale(width, height), max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, ImageFormat, Luma, Rgb};
    use std::io::Cursor;

    fn encode_png(img: DynamicImage) -> String {
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        BASE64.encode(buf.into_inner())
    }

    fn rgb_png(width: u32, height: u32) -> String {
        let img = RgbImage::from_pixel(width, height, Rgb([200, 40, 90]));
        encode_png(DynamicImage::ImageRgb8(img))
    }

    #[test]
    fn test_fit_within_bounds() {
        assert_eq!(fit_within(800, 600, 1024), (800, 600));
        assert_eq!(fit_within(1024, 1024, 1024), (1024, 1024));
        assert_eq!(fit_within(2048, 1024, 1024), (1024, 512));
        assert_eq!(fit_within(1000, 3000, 1024), (341, 1024));
        assert_eq!(fit_within(5000, 1, 1024), (1024, 1));
    }

    #[test]
    fn test_large_image_downscaled_to_max_side() {
        let normalizer = MediaNormalizer::default();
        let image = normalizer.normalize(&rgb_png(2048, 1536)).unwrap();

        assert_eq!(image.width(), 1024);
        assert_eq!(image.height(), 768);
        assert_eq!(image.mime(), "image/jpeg");
    }

    #[test]
    fn test_tall_image_keeps_aspect_ratio() {
        let normalizer = MediaNormalizer::default();
        let image = normalizer.normalize(&rgb_png(600, 1800)).unwrap();

        assert_eq!(image.height(), 1024);
        assert_eq!(image.width(), 341);
    }

    #[test]
    fn test_small_image_not_upscaled() {
        let normalizer = MediaNormalizer::default();
        let image = normalizer.normalize(&rgb_png(320, 200)).unwrap();

        assert_eq!((image.width(), image.height()), (320, 200));
    }

    #[test]
    fn test_output_is_rgb_jpeg() {
        let gray = GrayImage::from_pixel(64, 64, Luma([128]));
        let normalizer = MediaNormalizer::default();
        let image = normalizer
            .normalize(&encode_png(DynamicImage::ImageLuma8(gray)))
            .unwrap();

        let reparsed = image::load_from_memory(image.bytes()).unwrap();
        assert_eq!(
            image::guess_format(image.bytes()).unwrap(),
            ImageFormat::Jpeg
        );
        assert_eq!(reparsed.color(), image::ColorType::Rgb8);
    }

    #[test]
    fn test_data_url_prefix_stripped() {
        let normalizer = MediaNormalizer::default();
        let payload = format!("data:image/png;base64,{}", rgb_png(16, 16));

        assert!(normalizer.normalize(&payload).is_ok());
    }

    #[test]
    fn test_invalid_base64_rejected() {
        let normalizer = MediaNormalizer::default();
        let err = normalizer.normalize("not base64 at all!!").unwrap_err();

        assert!(matches!(err, MediaError::InvalidImage(_)));
    }

    #[test]
    fn test_non_image_bytes_rejected() {
        let normalizer = MediaNormalizer::default();
        let err = normalizer
            .normalize(&BASE64.encode(b"plain text, definitely not a picture"))
            .unwrap_err();

        assert!(matches!(err, MediaError::InvalidImage(_)));
    }

    #[test]
    fn test_size_limit_enforced_separately() {
        let normalizer = MediaNormalizer::new(MediaPolicy {
            max_bytes: 64,
            ..MediaPolicy::default()
        });
        let image = normalizer.normalize(&rgb_png(256, 256)).unwrap();

        let err = normalizer.enforce_size_limit(&image).unwrap_err();
        assert!(matches!(err, MediaError::ImageTooLarge { limit: 64, .. }));
    }

    #[tokio::test]
    async fn test_prepare_applies_size_limit() {
        let normalizer = MediaNormalizer::new(MediaPolicy {
            max_bytes: 64,
            ..MediaPolicy::default()
        });

        let result = normalizer.prepare(rgb_png(256, 256)).await;
        assert!(matches!(result, Err(MediaError::ImageTooLarge { .. })));
    }

    #[test]
    fn test_data_url_round_trip_prefix() {
        let normalizer = MediaNormalizer::default();
        let image = normalizer.normalize(&rgb_png(8, 8)).unwrap();

        assert!(image.to_data_url().starts_with("data:image/jpeg;base64,"));
    }
}
