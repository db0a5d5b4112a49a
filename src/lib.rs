//! Kapu Library
//!
//! This library contains the sensitive-content detection engine: a mutable
//! Unicode pattern trie, the vocabulary loaders that feed it, and the
//! moderation gate that turns matches into accept/reject verdicts. The
//! library is used by the `kapu` binary, and can also be embedded by any
//! service that needs to refuse text containing banned terms.
//!
//! # Architecture
//!
//! - [`data_structures::PatternTrie`]: the shared matcher
//! - [`vocabulary`]: word-list sources and load policies
//! - [`moderation::ModerationGate`]: the caller-side policy
//! - [`config`] and [`error`]: the ambient configuration and error types

// Re-export public modules
pub mod config;
pub mod data_structures;
pub mod error;
pub mod moderation;
pub mod vocabulary;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

pub use data_structures::{PatternTrie, PatternTrieConfig, ScanMode};
pub use moderation::{ModerationGate, Submission, Verdict};

/// Version information for Kapu.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
