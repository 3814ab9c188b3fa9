//! Image transformer - format conversion, rotation, and scaling
//!
//! All three operations decode once, apply one transform, and hand back
//! either encoded bytes (format conversion) or the in-memory image
//! (rotation and scaling, which the caller displays rather than stores).

use std::io::Cursor;
use std::str::FromStr;

use async_trait::async_trait;
use bytes::Bytes;
use image::{imageops, DynamicImage, GenericImageView, ImageFormat, ImageReader, Rgba};
use imageproc::geometric_transformations::{rotate_about_center, Interpolation};
use medialab_core::{MediaError, MediaResult};
use serde::{Deserialize, Serialize};

use crate::traits::{MediaTransformer, TransformKind};

/// Output format for image conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageOutputFormat {
    Png,
    Jpeg,
    Bmp,
    Gif,
    WebP,
    Tiff,
}

impl ImageOutputFormat {
    /// Map a requested format name to its canonical encoder. The two
    /// irregular aliases are `jpg` -> JPEG and `tif` -> TIFF.
    pub fn parse(name: &str) -> MediaResult<Self> {
        match name.to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "bmp" => Ok(Self::Bmp),
            "gif" => Ok(Self::Gif),
            "webp" => Ok(Self::WebP),
            "tif" | "tiff" => Ok(Self::Tiff),
            other => Err(MediaError::Validation(format!(
                "unsupported image format: {other} (expected png, jpg, bmp, gif, webp, or tif)"
            ))),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Bmp => "bmp",
            Self::Gif => "gif",
            Self::WebP => "webp",
            Self::Tiff => "tif",
        }
    }

    /// Canonical encoder name, as reported in conversion outcomes.
    pub fn encoder_name(&self) -> &'static str {
        match self {
            Self::Png => "PNG",
            Self::Jpeg => "JPEG",
            Self::Bmp => "BMP",
            Self::Gif => "GIF",
            Self::WebP => "WEBP",
            Self::Tiff => "TIFF",
        }
    }

    pub fn image_format(&self) -> ImageFormat {
        match self {
            Self::Png => ImageFormat::Png,
            Self::Jpeg => ImageFormat::Jpeg,
            Self::Bmp => ImageFormat::Bmp,
            Self::Gif => ImageFormat::Gif,
            Self::WebP => ImageFormat::WebP,
            Self::Tiff => ImageFormat::Tiff,
        }
    }
}

impl FromStr for ImageOutputFormat {
    type Err = MediaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ImageTransformOptions {
    FormatConvert { format: ImageOutputFormat },
    Rotate { angle_degrees: f32 },
    Scale { factor: f32 },
}

pub struct ImageTransformer;

impl ImageTransformer {
    /// Encode an image to the requested format in memory.
    pub fn encode(img: &DynamicImage, format: ImageOutputFormat) -> MediaResult<Bytes> {
        // JPEG has no alpha channel; flatten before encoding.
        let prepared = match format {
            ImageOutputFormat::Jpeg if img.color().has_alpha() => {
                DynamicImage::ImageRgb8(img.to_rgb8())
            }
            _ => img.clone(),
        };

        let mut buffer = Vec::new();
        let mut cursor = Cursor::new(&mut buffer);
        prepared
            .write_to(&mut cursor, format.image_format())
            .map_err(|e| MediaError::Encode(e.to_string()))?;

        Ok(Bytes::from(buffer))
    }

    /// Rotate counter-clockwise by `angle_degrees` in `0..=360`, keeping
    /// the original canvas size (corners rotate out of frame).
    pub fn rotate(img: &DynamicImage, angle_degrees: f32) -> MediaResult<DynamicImage> {
        if !(0.0..=360.0).contains(&angle_degrees) {
            return Err(MediaError::Validation(format!(
                "rotation angle {angle_degrees} out of range 0..=360"
            )));
        }

        if angle_degrees == 0.0 || angle_degrees == 360.0 {
            return Ok(img.clone());
        }

        if angle_degrees == 180.0 {
            return Ok(DynamicImage::ImageRgba8(imageops::rotate180(
                &img.to_rgba8(),
            )));
        }

        tracing::debug!(angle = angle_degrees, "Rotating image");

        // rotate_about_center is clockwise for positive theta.
        let theta = -angle_degrees.to_radians();
        let rotated = rotate_about_center(
            &img.to_rgba8(),
            theta,
            Interpolation::Bilinear,
            Rgba([0, 0, 0, 0]),
        );
        Ok(DynamicImage::ImageRgba8(rotated))
    }

    /// Scale both axes by `factor` in `0.1..=10.0`; target dimensions are
    /// rounded down independently.
    pub fn scale(img: &DynamicImage, factor: f32) -> MediaResult<DynamicImage> {
        if !(0.1..=10.0).contains(&factor) {
            return Err(MediaError::Validation(format!(
                "scale factor {factor} out of range 0.1..=10"
            )));
        }

        let (orig_width, orig_height) = img.dimensions();
        let new_width = (orig_width as f32 * factor).floor() as u32;
        let new_height = (orig_height as f32 * factor).floor() as u32;

        if new_width == 0 || new_height == 0 {
            return Err(MediaError::Validation(format!(
                "scale factor {factor} reduces {orig_width}x{orig_height} to zero pixels"
            )));
        }

        tracing::debug!(
            from = format!("{orig_width}x{orig_height}"),
            to = format!("{new_width}x{new_height}"),
            "Scaling image"
        );

        let filter = Self::select_filter(orig_width, orig_height, new_width, new_height);
        Ok(img.resize_exact(new_width, new_height, filter))
    }

    /// Select a resampling filter based on how far the resize goes.
    fn select_filter(
        orig_width: u32,
        orig_height: u32,
        new_width: u32,
        new_height: u32,
    ) -> imageops::FilterType {
        let width_ratio = orig_width as f32 / new_width as f32;
        let height_ratio = orig_height as f32 / new_height as f32;
        let max_ratio = width_ratio.max(height_ratio);

        if max_ratio > 2.0 {
            imageops::FilterType::Triangle
        } else if max_ratio > 1.5 {
            imageops::FilterType::CatmullRom
        } else {
            imageops::FilterType::Lanczos3
        }
    }
}

#[async_trait]
impl MediaTransformer for ImageTransformer {
    type Options = ImageTransformOptions;

    /// Bytes-to-bytes seam. Rotation and scaling results are carried as
    /// PNG, the lossless interchange for display surfaces.
    async fn transform(&self, data: &[u8], options: Self::Options) -> MediaResult<Bytes> {
        let img = ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .map_err(MediaError::Io)?
            .decode()
            .map_err(|e| MediaError::Decode(e.to_string()))?;

        match options {
            ImageTransformOptions::FormatConvert { format } => Self::encode(&img, format),
            ImageTransformOptions::Rotate { angle_degrees } => {
                let rotated = Self::rotate(&img, angle_degrees)?;
                Self::encode(&rotated, ImageOutputFormat::Png)
            }
            ImageTransformOptions::Scale { factor } => {
                let scaled = Self::scale(&img, factor)?;
                Self::encode(&scaled, ImageOutputFormat::Png)
            }
        }
    }

    fn supported_transforms(&self) -> Vec<TransformKind> {
        vec![
            TransformKind::ImageFormatConvert,
            TransformKind::ImageRotate,
            TransformKind::ImageScale,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, RgbaImage};

    fn test_image(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x * 23 % 256) as u8, (y * 31 % 256) as u8, 128, 255])
        }))
    }

    #[test]
    fn irregular_format_aliases() {
        assert_eq!(
            ImageOutputFormat::parse("jpg").unwrap().encoder_name(),
            "JPEG"
        );
        assert_eq!(
            ImageOutputFormat::parse("tif").unwrap().encoder_name(),
            "TIFF"
        );
        assert_eq!(
            ImageOutputFormat::parse("webp").unwrap().encoder_name(),
            "WEBP"
        );
        assert!(ImageOutputFormat::parse("svg").unwrap_err().is_validation());
    }

    #[test]
    fn encoded_bytes_decode_as_requested_format() {
        let img = test_image(8, 8);
        for name in ["png", "jpg", "bmp", "gif", "tif"] {
            let format = ImageOutputFormat::parse(name).unwrap();
            let bytes = ImageTransformer::encode(&img, format).unwrap();
            let guessed = ImageReader::new(Cursor::new(bytes.as_ref()))
                .with_guessed_format()
                .unwrap()
                .format();
            assert_eq!(guessed, Some(format.image_format()), "format {name}");
        }
    }

    #[test]
    fn jpeg_encoding_flattens_alpha() {
        let img = test_image(4, 4);
        let bytes = ImageTransformer::encode(&img, ImageOutputFormat::Jpeg).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert!(!decoded.color().has_alpha());
    }

    #[test]
    fn rotation_preserves_canvas_size() {
        let img = test_image(10, 6);
        for angle in [0.0, 45.0, 90.0, 180.0, 233.0, 360.0] {
            let rotated = ImageTransformer::rotate(&img, angle).unwrap();
            assert_eq!(rotated.dimensions(), (10, 6), "angle {angle}");
        }
    }

    #[test]
    fn zero_and_full_turn_are_identity() {
        let img = test_image(5, 5);
        for angle in [0.0, 360.0] {
            let rotated = ImageTransformer::rotate(&img, angle).unwrap();
            assert_eq!(rotated.to_rgba8(), img.to_rgba8());
        }
    }

    #[test]
    fn rotation_angle_out_of_range_is_rejected() {
        let img = test_image(4, 4);
        assert!(ImageTransformer::rotate(&img, -1.0)
            .unwrap_err()
            .is_validation());
        assert!(ImageTransformer::rotate(&img, 400.0)
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn scaling_rounds_dimensions_down() {
        let img = test_image(10, 10);
        assert_eq!(
            ImageTransformer::scale(&img, 2.0).unwrap().dimensions(),
            (20, 20)
        );
        assert_eq!(
            ImageTransformer::scale(&img, 0.5).unwrap().dimensions(),
            (5, 5)
        );

        let img = test_image(15, 7);
        // 15 * 0.9 = 13.5 -> 13, 7 * 0.9 = 6.3 -> 6
        assert_eq!(
            ImageTransformer::scale(&img, 0.9).unwrap().dimensions(),
            (13, 6)
        );
    }

    #[test]
    fn degenerate_scale_is_rejected() {
        let img = test_image(5, 5);
        // 5 * 0.1 = 0.5 -> 0 pixels
        assert!(ImageTransformer::scale(&img, 0.1)
            .unwrap_err()
            .is_validation());
        assert!(ImageTransformer::scale(&img, 0.01)
            .unwrap_err()
            .is_validation());
        assert!(ImageTransformer::scale(&img, 11.0)
            .unwrap_err()
            .is_validation());
    }

    #[tokio::test]
    async fn bytes_seam_converts_between_containers() {
        let img = test_image(6, 6);
        let png = ImageTransformer::encode(&img, ImageOutputFormat::Png).unwrap();

        let transformer = ImageTransformer;
        let out = transformer
            .transform(
                &png,
                ImageTransformOptions::FormatConvert {
                    format: ImageOutputFormat::Bmp,
                },
            )
            .await
            .unwrap();

        let guessed = ImageReader::new(Cursor::new(out.as_ref()))
            .with_guessed_format()
            .unwrap()
            .format();
        assert_eq!(guessed, Some(ImageFormat::Bmp));
    }

    #[tokio::test]
    async fn bytes_seam_scales_and_reports_png() {
        let img = test_image(10, 10);
        let png = ImageTransformer::encode(&img, ImageOutputFormat::Png).unwrap();

        let transformer = ImageTransformer;
        let out = transformer
            .transform(&png, ImageTransformOptions::Scale { factor: 2.0 })
            .await
            .unwrap();

        let decoded = image::load_from_memory(&out).unwrap();
        assert_eq!(decoded.dimensions(), (20, 20));
    }

    #[test]
    fn supported_transforms_cover_image_ops() {
        let kinds = ImageTransformer.supported_transforms();
        assert_eq!(kinds.len(), 3);
        assert!(kinds.contains(&TransformKind::ImageRotate));
    }
}
