//! Output artifact allocation
//!
//! Each converting operation writes to its own uniquely named file instead
//! of a constant path, so repeated or concurrent invocations never clobber
//! each other. The artifact id is returned to the caller alongside the
//! path.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A uniquely addressed output file allocated for one request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputArtifact {
    /// Request identifier embedded in the file name.
    pub id: String,
    /// Absolute or relative path of the output file.
    pub path: PathBuf,
}

impl OutputArtifact {
    /// Allocate a fresh artifact path under `output_dir`, creating the
    /// directory if it does not exist yet. The file itself is not created;
    /// the caller writes it.
    pub fn allocate(output_dir: &Path, stem: &str, extension: &str) -> io::Result<Self> {
        fs::create_dir_all(output_dir)?;

        let millis = chrono::Utc::now().timestamp_millis();
        let nonce = Uuid::new_v4().simple().to_string();
        let id = format!("{millis}-{}", &nonce[..8]);
        let path = output_dir.join(format!("{stem}-{id}.{extension}"));

        Ok(Self { id, path })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocations_are_unique() {
        let dir = tempfile::tempdir().unwrap();
        let a = OutputArtifact::allocate(dir.path(), "output", "mp3").unwrap();
        let b = OutputArtifact::allocate(dir.path(), "output", "mp3").unwrap();
        assert_ne!(a.path, b.path);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn creates_missing_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("out/converted");
        let artifact = OutputArtifact::allocate(&nested, "output", "wav").unwrap();
        assert!(nested.is_dir());
        assert!(artifact.path.starts_with(&nested));
        assert_eq!(
            artifact.path.extension().and_then(|e| e.to_str()),
            Some("wav")
        );
    }

    #[test]
    fn stem_and_id_appear_in_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = OutputArtifact::allocate(dir.path(), "trimmed", "mp3").unwrap();
        let name = artifact.path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("trimmed-"));
        assert!(name.contains(&artifact.id));
    }
}
