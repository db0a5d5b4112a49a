// Copyright (c) 2025 Kapu Authors
//
// Licensed under the MIT License (LICENSE or https://opensource.org/licenses/MIT)

//! Vocabulary loading.
//!
//! Turns newline-delimited word lists into [`PatternTrie`] rebuilds. Reading
//! and rebuilding form one fallible step: if a read fails the trie is left
//! exactly as it was.

mod error;
mod source;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::data_structures::PatternTrie;

pub use error::VocabularyError;
pub use source::{BoxedSource, FileSource, InlineSource, VocabularySource};

#[cfg(test)]
pub use source::MockVocabularySource;

/// Result type for vocabulary operations
pub type VocabularyResult<T> = Result<T, VocabularyError>;

/// How several sources combine into one vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergePolicy {
    /// Read every source first, then issue a single rebuild with all terms.
    /// Any read failure aborts the load before the trie is touched.
    #[default]
    Combined,

    /// Rebuild once per source, in order, so the last source read replaces
    /// the others. A failure stops the sequence; earlier rebuilds remain.
    LastSourceWins,
}

/// Line handling applied when parsing a word list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Strip leading and trailing whitespace from each line.
    pub trim_whitespace: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            trim_whitespace: true,
        }
    }
}

/// Splits `content` into terms, one per line, preserving order.
///
/// Empty lines are dropped; an empty pattern would make every text match.
/// A trailing `\r` is removed from every line.
pub fn parse_words(content: &str, options: &ParseOptions) -> Vec<String> {
    content
        .lines()
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .map(|line| if options.trim_whitespace { line.trim() } else { line })
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Reads and parses one source without touching any trie.
pub fn read_words(
    source: &dyn VocabularySource,
    options: &ParseOptions,
) -> VocabularyResult<Vec<String>> {
    let name = source.name();
    let content = source
        .read_to_string()
        .map_err(|cause| VocabularyError::unavailable(name.as_str(), cause))?;
    let words = parse_words(&content, options);
    debug!(source = %name, words = words.len(), "Vocabulary source read");
    Ok(words)
}

/// Replaces the vocabulary of `trie` with the terms of `source`.
///
/// # Returns
///
/// * `Ok(usize)` - The number of terms read from the source.
/// * `Err(VocabularyError)` - If the source could not be read; `trie` is unchanged.
pub fn load_words_from_source(
    trie: &PatternTrie,
    source: &dyn VocabularySource,
    options: &ParseOptions,
) -> VocabularyResult<usize> {
    let words = read_words(source, options)?;
    let count = words.len();
    trie.rebuild(words);
    Ok(count)
}

/// Loads several sources according to `policy`.
///
/// # Returns
///
/// * `Ok(usize)` - The number of terms in the final rebuild.
/// * `Err(VocabularyError)` - If no source is given or a source failed to read.
pub fn load_sources(
    trie: &PatternTrie,
    sources: &[BoxedSource],
    policy: MergePolicy,
    options: &ParseOptions,
) -> VocabularyResult<usize> {
    if sources.is_empty() {
        return Err(VocabularyError::NoSources);
    }

    match policy {
        MergePolicy::Combined => {
            let mut combined = Vec::new();
            for source in sources {
                combined.extend(read_words(&**source, options)?);
            }
            let count = combined.len();
            trie.rebuild(combined);
            info!(sources = sources.len(), words = count, "Combined vocabulary loaded");
            Ok(count)
        }
        MergePolicy::LastSourceWins => {
            let mut count = 0;
            for source in sources {
                count = load_words_from_source(trie, &**source, options).map_err(|e| {
                    warn!(source = %source.name(), error = %e, "Stopping vocabulary load");
                    e
                })?;
            }
            Ok(count)
        }
    }
}
