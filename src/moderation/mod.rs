//! Moderation gate.
//!
//! The gate is the caller side of the engine: it owns the shared
//! [`PatternTrie`], knows which sources make up the vocabulary, and turns a
//! match into an accept/reject [`Verdict`] for submitted content.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::{MatchingConfig, VocabularyConfig};
use crate::data_structures::{PatternTrie, PatternTrieConfig};
use crate::error::gate::GateError;
use crate::vocabulary::{self, BoxedSource, MergePolicy, ParseOptions, VocabularyResult};

/// Outcome of a moderation check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    /// No banned term was found.
    Accepted,

    /// The text contains `term`.
    Rejected {
        /// The first banned term found
        term: String,
    },
}

impl Verdict {
    /// Returns `true` if the content must be refused.
    pub fn is_rejected(&self) -> bool {
        matches!(self, Verdict::Rejected { .. })
    }
}

/// User-submitted content awaiting moderation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Submission {
    /// Title of the post
    pub title: String,

    /// Body of the post
    pub content: String,
}

/// Accepts or rejects text against a shared vocabulary.
pub struct ModerationGate {
    trie: Arc<PatternTrie>,
    sources: Vec<BoxedSource>,
    policy: MergePolicy,
    options: ParseOptions,
}

impl std::fmt::Debug for ModerationGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModerationGate")
            .field("sources", &self.source_names())
            .field("policy", &self.policy)
            .field("patterns", &self.trie.len())
            .finish()
    }
}

impl ModerationGate {
    /// Creates a gate and performs the initial load.
    ///
    /// # Returns
    ///
    /// * `Ok(ModerationGate)` - With the vocabulary loaded.
    /// * `Err(GateError::NoVocabulary)` - If the initial load failed; a gate
    ///   never starts without a vocabulary.
    pub fn new(
        sources: Vec<BoxedSource>,
        policy: MergePolicy,
        options: ParseOptions,
        trie_config: PatternTrieConfig,
    ) -> Result<Self, GateError> {
        let gate = Self {
            trie: Arc::new(PatternTrie::with_config(trie_config)),
            sources,
            policy,
            options,
        };

        let words = vocabulary::load_sources(&gate.trie, &gate.sources, gate.policy, &gate.options)
            .map_err(GateError::NoVocabulary)?;
        info!(
            sources = gate.sources.len(),
            words,
            patterns = gate.trie.len(),
            "Moderation gate ready"
        );
        Ok(gate)
    }

    /// Creates a gate from the vocabulary and matching configuration sections.
    pub fn from_config(
        vocabulary: &VocabularyConfig,
        matching: &MatchingConfig,
    ) -> Result<Self, GateError> {
        Self::new(
            vocabulary.build_sources(),
            vocabulary.merge_policy,
            vocabulary.parse_options(),
            matching.trie_config(),
        )
    }

    /// Reloads the vocabulary from the configured sources.
    ///
    /// On failure the gate keeps serving with the vocabulary it already had.
    /// Under [`MergePolicy::LastSourceWins`] that is whatever the sources
    /// read before the failing one left behind.
    pub fn reload(&self) -> VocabularyResult<usize> {
        match vocabulary::load_sources(&self.trie, &self.sources, self.policy, &self.options) {
            Ok(words) => {
                info!(words, patterns = self.trie.len(), "Vocabulary reloaded");
                Ok(words)
            }
            Err(e) => {
                warn!(
                    error = %e,
                    patterns = self.trie.len(),
                    "Reload failed, keeping previous vocabulary"
                );
                Err(e)
            }
        }
    }

    /// Checks `text` against the vocabulary.
    pub fn check<T: AsRef<str>>(&self, text: T) -> Verdict {
        match self.trie.find_first(text) {
            Some(term) => Verdict::Rejected { term },
            None => Verdict::Accepted,
        }
    }

    /// Checks the body of a submission.
    pub fn check_submission(&self, submission: &Submission) -> Verdict {
        self.check(&submission.content)
    }

    /// The shared trie, for callers that edit the vocabulary directly.
    pub fn trie(&self) -> Arc<PatternTrie> {
        Arc::clone(&self.trie)
    }

    /// Names of the configured sources, in load order.
    pub fn source_names(&self) -> Vec<String> {
        self.sources.iter().map(|source| source.name()).collect()
    }
}
