//! Moderation gate error module.

use thiserror::Error;

use crate::vocabulary::VocabularyError;

/// Errors raised while bringing up the moderation gate.
#[derive(Error, Debug)]
pub enum GateError {
    /// The gate cannot start because no vocabulary has ever loaded.
    #[error("No vocabulary could be loaded: {0}")]
    NoVocabulary(#[source] VocabularyError),
}
