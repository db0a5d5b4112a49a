// Copyright (c) 2025 Kapu Authors
//
// Licensed under the MIT License (LICENSE or https://opensource.org/licenses/MIT)

//! Error types for vocabulary loading.

/// Errors that can occur while loading vocabulary.
#[derive(Debug, thiserror::Error)]
pub enum VocabularyError {
    /// The source could not be read (missing, permission denied, I/O fault
    /// or content that is not valid UTF-8).
    #[error("Vocabulary source '{name}' unavailable: {cause}")]
    SourceUnavailable {
        /// Name of the source that failed.
        name: String,
        /// The underlying read failure.
        #[source]
        cause: std::io::Error,
    },

    /// No source was configured, so there is nothing to load.
    #[error("No vocabulary sources configured")]
    NoSources,
}

impl VocabularyError {
    /// Wraps a read failure of the named source.
    pub fn unavailable<S: Into<String>>(name: S, cause: std::io::Error) -> Self {
        Self::SourceUnavailable {
            name: name.into(),
            cause,
        }
    }
}
