//! Core traits for media processing
//!
//! The capability seam between operation logic and codec access: a
//! processor extracts metadata from an input file, a transformer turns
//! input bytes into output bytes. Codec implementations behind these
//! traits are swappable without touching the operations.

use std::path::Path;

use async_trait::async_trait;
use bytes::Bytes;
use medialab_core::MediaResult;

/// Transform type enumeration for all media types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformKind {
    // Audio transforms
    AudioTranscode,
    AudioTrim,

    // Image transforms
    ImageFormatConvert,
    ImageRotate,
    ImageScale,
}

/// Media processor trait - handles metadata extraction
pub trait MediaProcessor: Send + Sync {
    type Metadata: Send + Sync;

    /// Decode the input file and extract its metadata
    fn extract_metadata(&self, path: &Path) -> MediaResult<Self::Metadata>;
}

/// Media transformer trait - handles transformations
#[async_trait]
pub trait MediaTransformer: Send + Sync {
    type Options: Send + Sync;

    /// Apply transformation to media data
    async fn transform(&self, data: &[u8], options: Self::Options) -> MediaResult<Bytes>;

    /// List supported transform types
    fn supported_transforms(&self) -> Vec<TransformKind>;
}
