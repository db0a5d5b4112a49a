// Copyright (c) 2025 Kapu Authors
//
// Licensed under the MIT License (LICENSE or https://opensource.org/licenses/MIT)

//! Pattern Trie Implementation
//!
//! This module provides a mutable prefix tree over Unicode code points used to
//! detect banned vocabulary inside user-submitted text. The trie supports
//! insertion, deletion with upward pruning, atomic bulk rebuild and two
//! first-match-wins queries.
//!
//! # Example
//!
//! ```
//! use kapu_lib::data_structures::pattern_trie::PatternTrie;
//!
//! let trie = PatternTrie::from_words(["badword", "spam"]);
//! assert!(trie.contains_any("this is a badword here"));
//! assert_eq!(trie.find_first("totally clean text"), None);
//!
//! trie.delete("badword");
//! assert!(!trie.contains_any("this is a badword here"));
//! assert_eq!(trie.find_first("no spam please").as_deref(), Some("spam"));
//! ```
//!
//! # Concurrency
//!
//! All traversal happens under a read guard and all mutation under a write
//! guard of one [`parking_lot::RwLock`]. [`PatternTrie::rebuild`] assembles
//! the replacement tree before taking the guard and swaps it in whole, so a
//! reader observes either the old vocabulary or the new one.
//!
//! Text is compared code point by code point; no case folding or other
//! normalization is applied.

mod arena;
mod node;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use arena::NodeArena;

/// How a query walks the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanMode {
    /// Restart a walk from the root at every position of the text. Finds
    /// every contiguous occurrence of every pattern.
    #[default]
    Substring,

    /// A single cursor that advances on a matching child and silently skips
    /// code points that do not match, never returning to the root. Matches
    /// only when the text happens to walk a live prefix, and can match
    /// non-contiguous subsequences.
    CursorWalk,
}

/// Configuration options for the Pattern Trie
#[derive(Debug, Clone, Default)]
pub struct PatternTrieConfig {
    /// Scan strategy used by [`PatternTrie::contains_any`] and [`PatternTrie::find_first`]
    pub scan_mode: ScanMode,
}

impl PatternTrieConfig {
    /// Creates a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the scan strategy.
    pub fn scan_mode(mut self, scan_mode: ScanMode) -> Self {
        self.scan_mode = scan_mode;
        self
    }
}

/// A concurrent multi-pattern matcher over Unicode code points.
///
/// Key features:
/// * Shared prefixes are stored once
/// * Deleting a pattern prunes every node it leaves dead
/// * Rebuild replaces the vocabulary as one atomic step
/// * Queries run concurrently with each other
#[derive(Debug)]
pub struct PatternTrie {
    /// Node storage, guarded as a whole
    arena: RwLock<NodeArena>,

    /// Configuration options
    config: PatternTrieConfig,
}

impl PatternTrie {
    /// Creates a new empty `PatternTrie` with default configuration.
    pub fn new() -> Self {
        Self::with_config(PatternTrieConfig::default())
    }

    /// Creates a new empty `PatternTrie` with the specified configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Configuration for the trie.
    pub fn with_config(config: PatternTrieConfig) -> Self {
        Self {
            arena: RwLock::new(NodeArena::new()),
            config,
        }
    }

    /// Creates a `PatternTrie` holding `words`, using the default configuration.
    pub fn from_words<I>(words: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Self {
            arena: RwLock::new(NodeArena::from_words(words)),
            config: PatternTrieConfig::default(),
        }
    }

    /// Returns the scan strategy used by queries.
    pub fn scan_mode(&self) -> ScanMode {
        self.config.scan_mode
    }

    /// Inserts a pattern into the trie.
    ///
    /// Inserting an empty pattern marks the root terminal, after which every
    /// text matches. Vocabulary loaders filter empty lines for that reason.
    ///
    /// # Returns
    ///
    /// `true` if the pattern was new, `false` if it was already present.
    pub fn insert<P>(&self, pattern: P) -> bool
    where
        P: AsRef<str>,
    {
        self.arena.write().insert(pattern.as_ref())
    }

    /// Removes a pattern from the trie.
    ///
    /// Removing a pattern that was never inserted is a no-op. Nodes that the
    /// removal leaves without children and without a pattern are detached,
    /// walking up towards the root; prefixes still used by other patterns stay.
    ///
    /// # Returns
    ///
    /// `true` if the pattern was present and has been removed.
    pub fn delete<P>(&self, pattern: P) -> bool
    where
        P: AsRef<str>,
    {
        let pattern = pattern.as_ref();
        let removal = self.arena.write().delete(pattern);
        match removal {
            Some(removal) => {
                tracing::debug!(pattern, pruned = removal.pruned, "Pattern removed");
                true
            }
            None => false,
        }
    }

    /// Replaces the whole vocabulary with `words`, inserted in order.
    ///
    /// The replacement tree is built without holding the guard; concurrent
    /// queries keep using the previous tree until the swap.
    pub fn rebuild<I>(&self, words: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let fresh = NodeArena::from_words(words);
        let (patterns, nodes) = (fresh.pattern_count(), fresh.node_count());

        let previous = {
            let mut guard = self.arena.write();
            std::mem::replace(&mut *guard, fresh)
        };
        // The old tree is released after the guard is gone.
        drop(previous);

        tracing::info!(patterns, nodes, "Pattern trie rebuilt");
    }

    /// Removes every pattern.
    pub fn clear(&self) {
        self.rebuild(std::iter::empty::<&str>());
    }

    /// Returns `true` if `text` contains any stored pattern.
    ///
    /// Scanning stops at the first pattern found.
    pub fn contains_any<T>(&self, text: T) -> bool
    where
        T: AsRef<str>,
    {
        let arena = self.arena.read();
        self.scan(&arena, text.as_ref()).is_some()
    }

    /// Returns the first stored pattern found in `text`.
    ///
    /// In [`ScanMode::Substring`] this is the shortest pattern starting at
    /// the earliest position that starts any match.
    pub fn find_first<T>(&self, text: T) -> Option<String>
    where
        T: AsRef<str>,
    {
        let arena = self.arena.read();
        self.scan(&arena, text.as_ref()).map(str::to_owned)
    }

    fn scan<'a>(&self, arena: &'a NodeArena, text: &str) -> Option<&'a str> {
        match self.config.scan_mode {
            ScanMode::Substring => arena.find_first_substring(text),
            ScanMode::CursorWalk => arena.find_first_cursor_walk(text),
        }
    }

    /// Returns `true` if exactly `pattern` is stored.
    pub fn contains_pattern<P>(&self, pattern: P) -> bool
    where
        P: AsRef<str>,
    {
        self.arena.read().contains_pattern(pattern.as_ref())
    }

    /// Returns the number of stored patterns.
    pub fn len(&self) -> usize {
        self.arena.read().pattern_count()
    }

    /// Returns `true` if no pattern is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of live nodes, root included.
    pub fn node_count(&self) -> usize {
        self.arena.read().node_count()
    }

    /// Returns every stored pattern in sorted order.
    pub fn patterns(&self) -> Vec<String> {
        self.arena.read().patterns()
    }

    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        self.arena.read().assert_consistent();
    }
}

impl Default for PatternTrie {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_trie_basic_operations() {
        let trie = PatternTrie::new();
        assert!(trie.is_empty());
        assert_eq!(trie.node_count(), 1);

        assert!(trie.insert("badword"));
        assert!(trie.insert("spam"));
        assert_eq!(trie.len(), 2);

        assert!(trie.contains_any("this is a badword here"));
        assert_eq!(trie.find_first("totally clean text"), None);

        assert!(trie.delete("badword"));
        assert!(!trie.contains_any("this is a badword here"));
        assert!(trie.contains_any("no spam please"));
        assert!(!trie.delete("badword"));
        trie.assert_consistent();
    }

    #[test]
    fn test_prefix_conflict_short_circuits() {
        let trie = PatternTrie::from_words(["cat", "cats"]);
        assert_eq!(trie.find_first("cats").as_deref(), Some("cat"));
    }

    #[test]
    fn test_earliest_start_wins() {
        let trie = PatternTrie::from_words(["world", "lo"]);
        // "lo" starts at index 3, "world" at index 6
        assert_eq!(trie.find_first("hello world").as_deref(), Some("lo"));
    }

    #[test]
    fn test_unicode_patterns() {
        let trie = PatternTrie::from_words(["广告", "涉枪", "café"]);
        assert_eq!(trie.find_first("这是一条广告信息").as_deref(), Some("广告"));
        assert!(trie.contains_any("au café"));
        assert!(!trie.contains_any("cafe"));
        // No case folding
        assert!(!trie.contains_any("CAFÉ"));
    }

    #[test]
    fn test_cursor_walk_mode() {
        let trie =
            PatternTrie::with_config(PatternTrieConfig::new().scan_mode(ScanMode::CursorWalk));
        trie.insert("bad");
        assert_eq!(trie.scan_mode(), ScanMode::CursorWalk);

        assert!(trie.contains_any("bad"));
        assert!(trie.contains_any("b-a-d"));
        assert!(!trie.contains_any("dab"));
    }

    #[test]
    fn test_rebuild_replaces_vocabulary() {
        let trie = PatternTrie::from_words(["y"]);
        trie.rebuild(["x"]);
        assert!(!trie.contains_any("y"));
        assert!(trie.contains_any("x"));
        assert_eq!(trie.patterns(), vec!["x".to_string()]);
    }

    #[test]
    fn test_clear() {
        let trie = PatternTrie::from_words(["a", "b"]);
        trie.clear();
        assert!(trie.is_empty());
        assert_eq!(trie.node_count(), 1);
        assert!(!trie.contains_any("ab"));
    }

    #[test]
    fn test_trie_concurrency() {
        const READERS: usize = 6;
        const REBUILDS: usize = 50;

        let trie = Arc::new(PatternTrie::from_words(["alpha0", "beta0"]));
        let barrier = Arc::new(std::sync::Barrier::new(READERS + 1));

        let writer = {
            let trie = Arc::clone(&trie);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for generation in 1..=REBUILDS {
                    trie.rebuild([format!("alpha{generation}"), format!("beta{generation}")]);
                }
            })
        };

        let readers: Vec<_> = (0..READERS)
            .map(|_| {
                let trie = Arc::clone(&trie);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    for _ in 0..200 {
                        // Both words of a generation are always present together
                        let patterns = trie.patterns();
                        assert_eq!(patterns.len(), 2);
                        let generation = &patterns[0]["alpha".len()..];
                        assert_eq!(patterns[1], format!("beta{generation}"));
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        for reader in readers {
            reader.join().unwrap();
        }

        assert!(trie.contains_any(format!("xx beta{REBUILDS} yy")));
        assert!(!trie.contains_any("alpha0"));
        trie.assert_consistent();
    }
}
