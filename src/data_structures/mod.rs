//! Data structures for the Kapu detection engine.
//!
//! This module contains the shared matcher that every moderation check
//! runs against. It follows the project requirements:
//! - No unsafe code
//! - Many concurrent readers, serialized writers
//! - Atomic vocabulary replacement

pub mod pattern_trie;

// Re-export common data structures
pub use pattern_trie::{PatternTrie, PatternTrieConfig, ScanMode};
