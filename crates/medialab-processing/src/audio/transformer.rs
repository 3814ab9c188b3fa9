//! Audio transformer - resampling, container conversion, and trimming
//!
//! Re-encoding is delegated to ffmpeg. Inputs and outputs go through
//! temp files; argument vectors are built by pure functions so the codec
//! and rate selection logic is testable without the binary present.

use std::path::Path;
use std::process::Stdio;
use std::str::FromStr;

use async_trait::async_trait;
use bytes::Bytes;
use medialab_core::{MediaError, MediaResult};
use serde::{Deserialize, Serialize};
use tokio::process::Command;

use crate::traits::{MediaTransformer, TransformKind};

/// Output container format for audio conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    Mp3,
    Wav,
    Ogg,
    Flac,
}

impl AudioFormat {
    /// Returns the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Wav => "wav",
            Self::Ogg => "ogg",
            Self::Flac => "flac",
        }
    }

    /// Returns the ffmpeg codec name for this format.
    pub fn ffmpeg_codec(&self) -> &'static str {
        match self {
            Self::Mp3 => "libmp3lame",
            Self::Wav => "pcm_s16le",
            Self::Ogg => "libvorbis",
            Self::Flac => "flac",
        }
    }

    /// Returns the ffmpeg container name for this format.
    pub fn container(&self) -> &'static str {
        self.extension()
    }
}

impl FromStr for AudioFormat {
    type Err = MediaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mp3" => Ok(Self::Mp3),
            "wav" => Ok(Self::Wav),
            "ogg" => Ok(Self::Ogg),
            "flac" => Ok(Self::Flac),
            other => Err(MediaError::Validation(format!(
                "unsupported audio format: {other} (expected mp3, wav, ogg, or flac)"
            ))),
        }
    }
}

impl std::fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Resolve the target sample rate: a non-zero custom rate takes
/// precedence over the selected choice.
pub fn resolve_sample_rate(selected: u32, custom: Option<u32>) -> u32 {
    match custom {
        Some(rate) if rate != 0 => rate,
        _ => selected,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AudioTransformKind {
    Transcode {
        format: AudioFormat,
        sample_rate: u32,
    },
    Trim {
        start_secs: f64,
        end_secs: f64,
    },
}

pub struct AudioTransformer {
    ffmpeg_path: String,
}

impl AudioTransformer {
    pub fn new(ffmpeg_path: impl Into<String>) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
        }
    }

    async fn run_ffmpeg(&self, args: &[String]) -> MediaResult<()> {
        tracing::debug!(ffmpeg = %self.ffmpeg_path, ?args, "Running ffmpeg");

        let output = Command::new(&self.ffmpeg_path)
            .args(args)
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| {
                MediaError::Encode(format!("failed to execute {}: {e}", self.ffmpeg_path))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(MediaError::Encode(format!(
                "ffmpeg exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl MediaTransformer for AudioTransformer {
    type Options = AudioTransformKind;

    async fn transform(&self, data: &[u8], options: Self::Options) -> MediaResult<Bytes> {
        let input = tempfile::NamedTempFile::new()?;
        tokio::fs::write(input.path(), data).await?;
        let output = tempfile::NamedTempFile::new()?;

        let args = match options {
            AudioTransformKind::Transcode {
                format,
                sample_rate,
            } => {
                if sample_rate == 0 {
                    return Err(MediaError::Validation(
                        "sample rate must be non-zero".to_string(),
                    ));
                }
                transcode_args(input.path(), output.path(), format, sample_rate)
            }
            AudioTransformKind::Trim {
                start_secs,
                end_secs,
            } => {
                if start_secs < 0.0 || end_secs <= start_secs {
                    return Err(MediaError::Validation(format!(
                        "trim range [{start_secs}, {end_secs}) is empty"
                    )));
                }
                trim_args(input.path(), output.path(), start_secs, end_secs)
            }
        };

        self.run_ffmpeg(&args).await?;

        let encoded = tokio::fs::read(output.path()).await?;
        Ok(Bytes::from(encoded))
    }

    fn supported_transforms(&self) -> Vec<TransformKind> {
        vec![TransformKind::AudioTranscode, TransformKind::AudioTrim]
    }
}

/// Build the ffmpeg argument vector for a resample-and-reencode pass.
fn transcode_args(
    input: &Path,
    output: &Path,
    format: AudioFormat,
    sample_rate: u32,
) -> Vec<String> {
    vec![
        "-i".to_string(),
        input.to_string_lossy().to_string(),
        "-ar".to_string(),
        sample_rate.to_string(),
        "-acodec".to_string(),
        format.ffmpeg_codec().to_string(),
        "-f".to_string(),
        format.container().to_string(),
        "-y".to_string(),
        output.to_string_lossy().to_string(),
    ]
}

/// Build the ffmpeg argument vector for an MP3 re-encoding trim.
/// The end offset past the input length truncates to the available audio.
fn trim_args(input: &Path, output: &Path, start_secs: f64, end_secs: f64) -> Vec<String> {
    vec![
        "-i".to_string(),
        input.to_string_lossy().to_string(),
        "-ss".to_string(),
        start_secs.to_string(),
        "-t".to_string(),
        (end_secs - start_secs).to_string(),
        "-acodec".to_string(),
        AudioFormat::Mp3.ffmpeg_codec().to_string(),
        "-f".to_string(),
        AudioFormat::Mp3.container().to_string(),
        "-y".to_string(),
        output.to_string_lossy().to_string(),
    ]
}
