//! Audio processing module

pub mod inspector;
pub mod tags;
pub mod transformer;

pub use inspector::{inspect, AudioProcessor};
pub use tags::write_basic_tags;
pub use transformer::{resolve_sample_rate, AudioFormat, AudioTransformKind, AudioTransformer};

use std::path::Path;

use medialab_core::{Config, MediaResult, OutputArtifact};

use crate::metadata::ConversionOutcome;
use crate::traits::MediaTransformer;

/// Convert an audio file to `format`, resampled to the resolved rate.
/// Writes a uniquely named artifact under the configured output directory.
pub async fn convert(
    path: &Path,
    format: AudioFormat,
    selected_rate: u32,
    custom_rate: Option<u32>,
    config: &Config,
) -> MediaResult<ConversionOutcome> {
    let sample_rate = resolve_sample_rate(selected_rate, custom_rate);
    let data = tokio::fs::read(path).await?;

    let transformer = AudioTransformer::new(&config.ffmpeg_path);
    let encoded = transformer
        .transform(&data, AudioTransformKind::Transcode { format, sample_rate })
        .await?;

    let artifact = OutputArtifact::allocate(&config.output_dir, "output", format.extension())?;
    tokio::fs::write(&artifact.path, &encoded).await?;

    tracing::info!(
        input = %path.display(),
        output = %artifact.path.display(),
        format = %format,
        sample_rate,
        "Converted audio"
    );

    Ok(ConversionOutcome {
        artifact_id: artifact.id,
        path: artifact.path,
        format: format.to_string(),
        sample_rate: Some(sample_rate),
    })
}

/// Cut the `[start_secs, end_secs)` range out of an audio file and
/// re-encode it as MP3.
pub async fn trim(
    path: &Path,
    start_secs: f64,
    end_secs: f64,
    config: &Config,
) -> MediaResult<ConversionOutcome> {
    let data = tokio::fs::read(path).await?;

    let transformer = AudioTransformer::new(&config.ffmpeg_path);
    let encoded = transformer
        .transform(
            &data,
            AudioTransformKind::Trim {
                start_secs,
                end_secs,
            },
        )
        .await?;

    let artifact = OutputArtifact::allocate(&config.output_dir, "trimmed", "mp3")?;
    tokio::fs::write(&artifact.path, &encoded).await?;

    tracing::info!(
        input = %path.display(),
        output = %artifact.path.display(),
        start_secs,
        end_secs,
        "Trimmed audio"
    );

    Ok(ConversionOutcome {
        artifact_id: artifact.id,
        path: artifact.path,
        format: AudioFormat::Mp3.to_string(),
        sample_rate: None,
    })
}
