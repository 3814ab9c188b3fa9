//! Medialab Core Library
//!
//! This crate provides the error type, configuration, and output artifact
//! allocation shared by all medialab components.

pub mod artifact;
pub mod config;
pub mod error;

// Re-export commonly used types
pub use artifact::OutputArtifact;
pub use config::Config;
pub use error::{MediaError, MediaResult};
