//! Medialab Processing Library
//!
//! Media operations behind a narrow capability seam: audio inspection,
//! conversion, trimming, and tag writing; image inspection, format
//! conversion, rotation, and scaling. Each operation decodes one input,
//! applies one transform, and returns one result.

pub mod audio;
pub mod image;
pub mod metadata;
pub mod traits;

// Re-export commonly used types
pub use metadata::{AudioInfo, ConversionOutcome, ImageInfo, TagView};
pub use traits::{MediaProcessor, MediaTransformer, TransformKind};
