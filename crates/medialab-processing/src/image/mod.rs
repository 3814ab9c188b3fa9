//! Image processing module

pub mod inspector;
pub mod transformer;

pub use inspector::{inspect, ImageProcessor};
pub use transformer::{ImageOutputFormat, ImageTransformOptions, ImageTransformer};

use std::fs;
use std::path::Path;

use image::{DynamicImage, ImageReader};
use medialab_core::{Config, MediaError, MediaResult, OutputArtifact};

use crate::metadata::ConversionOutcome;

/// Convert an image file to the named output format. Writes a uniquely
/// named artifact under the configured output directory.
pub fn convert(path: &Path, format_name: &str, config: &Config) -> MediaResult<ConversionOutcome> {
    let format = ImageOutputFormat::parse(format_name)?;
    let img = open_image(path)?;
    let encoded = ImageTransformer::encode(&img, format)?;

    let artifact = OutputArtifact::allocate(&config.output_dir, "output", format.extension())?;
    fs::write(&artifact.path, &encoded)?;

    tracing::info!(
        input = %path.display(),
        output = %artifact.path.display(),
        format = format.encoder_name(),
        "Converted image"
    );

    Ok(ConversionOutcome {
        artifact_id: artifact.id,
        path: artifact.path,
        format: format.encoder_name().to_string(),
        sample_rate: None,
    })
}

/// Rotate an image counter-clockwise by `angle_degrees`, keeping the
/// canvas size. Returns the rotated image; nothing is written.
pub fn rotate(path: &Path, angle_degrees: f32) -> MediaResult<DynamicImage> {
    let img = open_image(path)?;
    ImageTransformer::rotate(&img, angle_degrees)
}

/// Scale an image by `factor` on both axes. Returns the resized image;
/// nothing is written.
pub fn scale(path: &Path, factor: f32) -> MediaResult<DynamicImage> {
    let img = open_image(path)?;
    ImageTransformer::scale(&img, factor)
}

/// Persist an in-memory image, inferring the encoder from the path
/// extension. Display-surface helper for the rotate/scale results.
pub fn save(img: &DynamicImage, path: &Path) -> MediaResult<()> {
    img.save(path)
        .map_err(|e| MediaError::Encode(e.to_string()))
}

fn open_image(path: &Path) -> MediaResult<DynamicImage> {
    ImageReader::open(path)?
        .with_guessed_format()?
        .decode()
        .map_err(|e| MediaError::Decode(e.to_string()))
}
