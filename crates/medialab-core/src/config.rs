//! Configuration module
//!
//! Environment-driven settings for the toolkit: where conversion outputs
//! land and which ffmpeg binary to invoke.

use std::env;
use std::path::PathBuf;

const DEFAULT_OUTPUT_DIR: &str = "./tmp";
const DEFAULT_FFMPEG_PATH: &str = "ffmpeg";

/// Runtime configuration shared by all converting operations.
#[derive(Clone, Debug)]
pub struct Config {
    /// Directory where output artifacts are written. Created on demand.
    pub output_dir: PathBuf,
    /// Path or name of the ffmpeg binary used for audio re-encoding.
    pub ffmpeg_path: String,
}

impl Config {
    pub fn from_env() -> Self {
        let output_dir = env::var("MEDIALAB_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_OUTPUT_DIR));
        let ffmpeg_path =
            env::var("MEDIALAB_FFMPEG_PATH").unwrap_or_else(|_| DEFAULT_FFMPEG_PATH.to_string());

        Self {
            output_dir,
            ffmpeg_path,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            ffmpeg_path: DEFAULT_FFMPEG_PATH.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.output_dir, PathBuf::from("./tmp"));
        assert_eq!(config.ffmpeg_path, "ffmpeg");
    }
}
