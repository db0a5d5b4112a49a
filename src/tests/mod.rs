//! Test modules for Kapu.
//!
//! This module contains the crate-internal testing infrastructure:
//! - Unit tests for configuration, errors and vocabulary loading
//! - Property-based tests for the pattern trie using proptest
//! - Test fixtures and utilities

pub mod config_tests;

// Re-export commonly used testing tools to simplify imports in test modules
pub use test_utils::{
    alphabet_string_strategy, naive_contains_any, pattern_strategy, vocabulary_strategy,
    TestFixture,
};
