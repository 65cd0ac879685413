//! Endpoint extraction.
//!
//! Recognizing annotations in source code is left to language-specific
//! scanners. This module consumes their output through [`ApiExtractor`] and
//! applies the selection and strict-mode rules that decide what gets
//! uploaded.

mod cache;
mod manifest;
mod resolve;
mod types;

pub use cache::ResourceCache;
pub use manifest::ManifestExtractor;
pub use resolve::*;
pub use types::*;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

/// Errors that can occur while extracting endpoints.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Source could not be read.
    #[error("Failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Source was read but could not be understood.
    #[error("Failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// The selected controller or method does not exist.
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Produces endpoint descriptions from source files.
pub trait ApiExtractor: Send + Sync {
    /// Returns the name of this extractor implementation.
    fn name(&self) -> &str;

    /// Extracts every controller declared in `path`.
    fn parse_file(&self, path: &Path) -> Result<Arc<SourceManifest>, ExtractError>;
}
