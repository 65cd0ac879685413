//! Types produced by API extractors.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::api::Api;

/// What the user asked to upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// One handler method of one controller.
    Method {
        file: PathBuf,
        controller: String,
        method: String,
    },
    /// Every endpoint of one controller.
    Controller { file: PathBuf, controller: String },
    /// Every controller found in a set of files.
    Files(Vec<PathBuf>),
}

/// Extraction output for one source file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceManifest {
    #[serde(default)]
    pub controllers: Vec<ControllerManifest>,
}

impl SourceManifest {
    pub fn controller(&self, name: &str) -> Option<&ControllerManifest> {
        self.controllers.iter().find(|c| c.name == name)
    }
}

/// Extraction output for one controller (a class grouping endpoints).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerManifest {
    pub name: String,
    /// False when the class is not a controller or is marked as ignored.
    #[serde(default = "default_valid")]
    pub valid: bool,
    /// Category written by hand in the source, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declared_category: Option<String>,
    #[serde(default)]
    pub methods: Vec<EndpointManifest>,
}

impl ControllerManifest {
    pub fn method(&self, name: &str) -> Option<&EndpointManifest> {
        self.methods.iter().find(|m| m.name == name)
    }

    pub fn has_declared_category(&self) -> bool {
        self.declared_category
            .as_deref()
            .is_some_and(|c| !c.trim().is_empty())
    }

    /// Endpoints of every valid method, in declaration order.
    pub fn apis(&self) -> Vec<Api> {
        self.methods
            .iter()
            .filter(|m| m.valid)
            .flat_map(|m| m.apis.iter().cloned())
            .collect()
    }
}

/// Extraction output for one handler method.
///
/// A method mapped to several paths or verbs yields several endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointManifest {
    pub name: String,
    /// False when the method is not a handler or is marked as ignored.
    #[serde(default = "default_valid")]
    pub valid: bool,
    /// Summary written by hand in the source, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declared_summary: Option<String>,
    #[serde(default)]
    pub apis: Vec<Api>,
}

impl EndpointManifest {
    pub fn has_declared_summary(&self) -> bool {
        self.declared_summary
            .as_deref()
            .is_some_and(|s| !s.trim().is_empty())
    }
}

fn default_valid() -> bool {
    true
}
