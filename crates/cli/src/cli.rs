//! Command-line arguments.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};

use docpush_core::{Selection, DEFAULT_CONFIG_FILE};

/// Upload extracted API descriptions to a documentation platform.
#[derive(Parser, Debug)]
#[command(name = "docpush")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log as JSON lines
    #[arg(long = "log-json", global = true)]
    pub log_json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Upload the endpoints found in one or more manifests.
    Upload(UploadArgs),

    /// Print the effective configuration with secrets redacted.
    Config {
        /// Configuration file
        #[arg(long, env = "DOCPUSH_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,
    },
}

#[derive(Args, Debug)]
pub struct UploadArgs {
    /// Manifest files produced by the extractor
    #[arg(required = true)]
    pub manifests: Vec<PathBuf>,

    /// Configuration file
    #[arg(long, env = "DOCPUSH_CONFIG", conflicts_with = "no_config")]
    pub config: Option<PathBuf>,

    /// Only upload this controller (needs a single manifest)
    #[arg(long)]
    pub controller: Option<String>,

    /// Only upload this handler method of --controller
    #[arg(long, requires = "controller")]
    pub method: Option<String>,

    /// Run with built-in defaults when no config file exists
    #[arg(long = "no-config")]
    pub no_config: bool,

    /// Print Prometheus metrics after the upload
    #[arg(long)]
    pub metrics: bool,
}

impl UploadArgs {
    /// The config file to look for; `None` when running without one.
    pub fn config_path(&self) -> Option<PathBuf> {
        match (&self.config, self.no_config) {
            (Some(path), _) => Some(path.clone()),
            (None, true) => None,
            (None, false) => Some(PathBuf::from(DEFAULT_CONFIG_FILE)),
        }
    }

    pub fn required_config_file(&self) -> bool {
        !self.no_config
    }

    pub fn selection(&self) -> Result<Selection> {
        let Some(controller) = &self.controller else {
            return Ok(Selection::Files(self.manifests.clone()));
        };
        let [file] = self.manifests.as_slice() else {
            bail!("--controller needs exactly one manifest, got {}", self.manifests.len());
        };
        Ok(match &self.method {
            Some(method) => Selection::Method {
                file: file.clone(),
                controller: controller.clone(),
                method: method.clone(),
            },
            None => Selection::Controller {
                file: file.clone(),
                controller: controller.clone(),
            },
        })
    }
}
