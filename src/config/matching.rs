//! Matching configuration.

use serde::{Deserialize, Serialize};

use super::{ConfigResult, Validate};
use crate::data_structures::{PatternTrieConfig, ScanMode};

/// Matching configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Scan strategy used for every check
    pub scan_mode: ScanMode,
}

impl MatchingConfig {
    /// Trie configuration derived from this section.
    pub fn trie_config(&self) -> PatternTrieConfig {
        PatternTrieConfig::new().scan_mode(self.scan_mode)
    }
}

impl Validate for MatchingConfig {
    fn validate(&self) -> ConfigResult<()> {
        Ok(())
    }
}
