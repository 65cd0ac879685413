//! Extractor reading pre-extracted controller manifests.
//!
//! A manifest is the JSON produced by a language-specific annotation scanner:
//! one file per scanned source file, listing its controllers, their handler
//! methods and the endpoints those map to.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use super::cache::ResourceCache;
use super::types::SourceManifest;
use super::{ApiExtractor, ExtractError};

/// Reads JSON manifests from disk, parsing each path once per process.
#[derive(Debug, Default)]
pub struct ManifestExtractor {
    cache: ResourceCache<PathBuf, Arc<SourceManifest>>,
}

impl ManifestExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets the cached manifest of `path`, e.g. after it was rewritten.
    pub fn invalidate(&self, path: &Path) -> bool {
        self.cache.invalidate(&path.to_path_buf())
    }

    /// Number of manifests currently cached.
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    fn read(path: &Path) -> Result<Arc<SourceManifest>, ExtractError> {
        debug!("Reading manifest {:?}", path);
        let content = std::fs::read_to_string(path).map_err(|e| ExtractError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let manifest: SourceManifest =
            serde_json::from_str(&content).map_err(|e| ExtractError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        Ok(Arc::new(manifest))
    }
}

impl ApiExtractor for ManifestExtractor {
    fn name(&self) -> &str {
        "manifest"
    }

    fn parse_file(&self, path: &Path) -> Result<Arc<SourceManifest>, ExtractError> {
        self.cache
            .get_or_try_insert_with(&path.to_path_buf(), || Self::read(path))
    }
}
