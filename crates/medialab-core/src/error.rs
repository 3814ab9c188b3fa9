//! Error types module
//!
//! Every medialab operation returns `MediaResult<T>` with a tagged failure:
//! a precondition rejection, a decode failure, an encode failure, a tag
//! read/write failure, or plain I/O. There is no catch-and-stringify path;
//! callers decide how to present each variant.

use std::io;

#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Encode error: {0}")]
    Encode(String),

    #[error("Tag error: {0}")]
    Tag(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl MediaError {
    /// Whether the failure was rejected before any work was attempted.
    pub fn is_validation(&self) -> bool {
        matches!(self, MediaError::Validation(_))
    }
}

pub type MediaResult<T> = Result<T, MediaError>;
