//! `znato.toml` settings.
//!
//! Every key is optional. Values given on the command line override the file,
//! and the file overrides the built-in defaults.
//!
//! ```toml
//! [duplicates]
//! threshold = 0.8
//! parallel = false
//!
//! [output]
//! format = "table"
//!
//! [build]
//! base_iri = "http://example.org/ontology#"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use znato_dedup::{DetectorConfig, DEFAULT_THRESHOLD};
use znato_graph::metagraph::DEFAULT_BASE_IRI;

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "znato.toml";

/// Errors raised while reading a settings file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read config file {path}: {source}")]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The file is not valid settings TOML.
    #[error("invalid config file {path}: {source}")]
    Parse {
        /// File that failed.
        path: PathBuf,
        /// Underlying TOML error.
        source: toml::de::Error,
    },
}

/// How reports are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[derive(Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table.
    #[default]
    Table,
    /// Pretty-printed JSON.
    Json,
}

/// `[duplicates]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DuplicateSettings {
    /// Minimum label similarity, inclusive.
    pub threshold: f64,
    /// Scan pairs in parallel.
    pub parallel: bool,
}

impl Default for DuplicateSettings {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            parallel: false,
        }
    }
}

/// `[output]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSettings {
    /// Report format.
    pub format: OutputFormat,
}

/// `[build]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildSettings {
    /// Namespace for generated classes and properties.
    pub base_iri: String,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            base_iri: DEFAULT_BASE_IRI.to_owned(),
        }
    }
}

/// All settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Duplicate detection.
    pub duplicates: DuplicateSettings,
    /// Report output.
    pub output: OutputSettings,
    /// Ontology builds.
    pub build: BuildSettings,
}

impl Settings {
    /// Parses settings from TOML text.
    ///
    /// # Errors
    ///
    /// Returns the TOML error if the text is malformed or has unknown keys.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Reads settings from a file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read and
    /// [`ConfigError::Parse`] if its contents are invalid.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads the explicit file if one is given, otherwise `znato.toml` in
    /// `dir` when it exists, otherwise the defaults.
    ///
    /// # Errors
    ///
    /// Fails if an explicit file is missing, or if the file that was found
    /// cannot be read or parsed.
    pub fn load(explicit: Option<&Path>, dir: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            debug!(path = %path.display(), "loading config");
            return Self::from_file(path);
        }
        let fallback = dir.join(DEFAULT_CONFIG_FILE);
        if fallback.is_file() {
            debug!(path = %fallback.display(), "loading config");
            Self::from_file(&fallback)
        } else {
            Ok(Self::default())
        }
    }

    /// Detector settings, with command-line values taking precedence over
    /// the `[duplicates]` section.
    #[must_use]
    pub fn detector_config(
        &self,
        similarity: Option<f64>,
        parallel: Option<bool>,
    ) -> DetectorConfig {
        DetectorConfig {
            threshold: similarity.unwrap_or(self.duplicates.threshold),
            parallel: parallel.unwrap_or(self.duplicates.parallel),
        }
    }

    /// Report format, with the command-line value taking precedence.
    #[must_use]
    pub fn output_format(&self, format: Option<OutputFormat>) -> OutputFormat {
        format.unwrap_or(self.output.format)
    }

    /// Base IRI for builds, with the command-line value taking precedence.
    #[must_use]
    pub fn base_iri<'a>(&'a self, base_iri: Option<&'a str>) -> &'a str {
        base_iri.unwrap_or(&self.build.base_iri)
    }
}
