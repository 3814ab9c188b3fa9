//! Medialab CLI — interactive surface binding each media operation to one
//! library call. Results print as JSON; converted files land under the
//! configured output directory (MEDIALAB_OUTPUT_DIR, default ./tmp).

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use medialab_cli::init_tracing;
use medialab_core::{Config, OutputArtifact};
use medialab_processing::audio::{self, AudioFormat};
use medialab_processing::image;
use serde::Serialize;

#[derive(Parser)]
#[command(name = "medialab", about = "Audio and image inspection and conversion toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Audio operations
    Audio {
        #[command(subcommand)]
        sub: AudioCommands,
    },
    /// Image operations
    Image {
        #[command(subcommand)]
        sub: ImageCommands,
    },
}

#[derive(Subcommand)]
enum AudioCommands {
    /// Show duration, channels, frame rate, sample width, and ID3 tags
    Info {
        /// Path to the audio file
        file: PathBuf,
    },
    /// Convert container format and sampling rate
    Convert {
        /// Path to the audio file
        file: PathBuf,
        /// Output format: mp3, wav, ogg, flac
        #[arg(long)]
        format: String,
        /// Target sample rate (common choices: 48000, 44100, 96000, 192000, 22000)
        #[arg(long, default_value = "44100")]
        rate: u32,
        /// Custom sample rate; overrides --rate when non-zero
        #[arg(long)]
        custom_rate: Option<u32>,
    },
    /// Cut a time range and re-encode as MP3
    Trim {
        /// Path to the audio file
        file: PathBuf,
        /// Start time in seconds (inclusive)
        #[arg(long)]
        start: f64,
        /// End time in seconds (exclusive)
        #[arg(long)]
        end: f64,
    },
    /// Write title/artist/album ID3 tags in place (MP3 only)
    Tag {
        /// Path to the MP3 file
        file: PathBuf,
        #[arg(long)]
        title: String,
        #[arg(long)]
        artist: String,
        #[arg(long)]
        album: String,
    },
}

#[derive(Subcommand)]
enum ImageCommands {
    /// Show format, color mode, dimensions, and EXIF metadata
    Info {
        /// Path to the image file
        file: PathBuf,
    },
    /// Convert to another image format
    Convert {
        /// Path to the image file
        file: PathBuf,
        /// Output format: png, jpg, bmp, gif, webp, tif
        #[arg(long)]
        format: String,
    },
    /// Rotate counter-clockwise, keeping the canvas size
    Rotate {
        /// Path to the image file
        file: PathBuf,
        /// Rotation angle in degrees (0-360)
        #[arg(long)]
        angle: f32,
        /// Where to write the rotated image (default: allocated under the output dir)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Scale both axes by a factor
    Scale {
        /// Path to the image file
        file: PathBuf,
        /// Scale factor (0.1-10)
        #[arg(long)]
        factor: f32,
        /// Where to write the scaled image (default: allocated under the output dir)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

/// Resolve the display path for an in-memory rotate/scale result.
fn display_target(output: Option<PathBuf>, config: &Config, stem: &str) -> anyhow::Result<PathBuf> {
    match output {
        Some(path) => Ok(path),
        None => {
            let artifact = OutputArtifact::allocate(&config.output_dir, stem, "png")
                .context("Allocate output artifact")?;
            Ok(artifact.path)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = Config::from_env();

    match cli.command {
        Commands::Audio { sub } => match sub {
            AudioCommands::Info { file } => {
                let info = audio::inspect(&file)?;
                print_json(&info)?;
            }
            AudioCommands::Convert {
                file,
                format,
                rate,
                custom_rate,
            } => {
                let format: AudioFormat = format.parse()?;
                let outcome = audio::convert(&file, format, rate, custom_rate, &config).await?;
                print_json(&outcome)?;
            }
            AudioCommands::Trim { file, start, end } => {
                let outcome = audio::trim(&file, start, end, &config).await?;
                print_json(&outcome)?;
            }
            AudioCommands::Tag {
                file,
                title,
                artist,
                album,
            } => {
                audio::write_basic_tags(&file, &title, &artist, &album)?;
                print_json(&serde_json::json!({
                    "success": true,
                    "message": "Metadata added successfully"
                }))?;
            }
        },
        Commands::Image { sub } => match sub {
            ImageCommands::Info { file } => {
                let info = image::inspect(&file)?;
                print_json(&info)?;
            }
            ImageCommands::Convert { file, format } => {
                let outcome = image::convert(&file, &format, &config)?;
                print_json(&outcome)?;
            }
            ImageCommands::Rotate {
                file,
                angle,
                output,
            } => {
                let rotated = image::rotate(&file, angle)?;
                let target = display_target(output, &config, "rotated")?;
                image::save(&rotated, &target)?;
                print_json(&serde_json::json!({ "path": target }))?;
            }
            ImageCommands::Scale {
                file,
                factor,
                output,
            } => {
                let scaled = image::scale(&file, factor)?;
                let target = display_target(output, &config, "scaled")?;
                image::save(&scaled, &target)?;
                print_json(&serde_json::json!({ "path": target }))?;
            }
        },
    }

    Ok(())
}
