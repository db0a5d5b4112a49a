//! Vocabulary configuration.
//!
//! Lists the word-list files the moderation gate loads and how they combine.

use std::collections::HashSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::{ConfigResult, Validate};
use crate::error::config::ConfigError;
use crate::vocabulary::{BoxedSource, FileSource, MergePolicy, ParseOptions};

/// One word-list file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Category name used in logs
    pub name: String,

    /// Path to a UTF-8 file with one term per line
    pub path: PathBuf,
}

impl SourceConfig {
    /// Creates a source entry named after the file stem of `path`.
    pub fn from_path<P: Into<PathBuf>>(path: P) -> Self {
        let path = path.into();
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { name, path }
    }

    /// Builds the file source this entry describes.
    pub fn to_source(&self) -> BoxedSource {
        Box::new(FileSource::named(self.name.clone(), &self.path))
    }
}

/// Vocabulary configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VocabularyConfig {
    /// Word-list files, loaded in order
    pub sources: Vec<SourceConfig>,

    /// How the sources combine
    pub merge_policy: MergePolicy,

    /// Strip surrounding whitespace from every line before insertion
    pub trim_whitespace: bool,
}

impl Default for VocabularyConfig {
    fn default() -> Self {
        Self {
            sources: Vec::new(),
            merge_policy: MergePolicy::Combined,
            trim_whitespace: true,
        }
    }
}

impl VocabularyConfig {
    /// Line handling derived from this configuration.
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            trim_whitespace: self.trim_whitespace,
        }
    }

    /// Builds the configured sources, in order.
    pub fn build_sources(&self) -> Vec<BoxedSource> {
        self.sources.iter().map(SourceConfig::to_source).collect()
    }
}

impl Validate for VocabularyConfig {
    fn validate(&self) -> ConfigResult<()> {
        let mut seen = HashSet::new();
        for source in &self.sources {
            if source.name.trim().is_empty() {
                return Err(ConfigError::ValidationError(
                    "vocabulary source name must not be empty".to_string(),
                ));
            }
            if source.path.as_os_str().is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "vocabulary source '{}' has an empty path",
                    source.name
                )));
            }
            if !seen.insert(source.name.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate vocabulary source name: {}",
                    source.name
                )));
            }
        }
        Ok(())
    }
}
