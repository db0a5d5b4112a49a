// Copyright (c) 2025 Kapu Authors
//
// Licensed under the MIT License (LICENSE or https://opensource.org/licenses/MIT)

//! Node type for the Pattern Trie.
//!
//! Nodes live in a [`NodeArena`](super::arena::NodeArena) and refer to each
//! other through [`NodeId`] indices rather than owned pointers, so the parent
//! back-reference used for pruning never forms an ownership cycle.

use fnv::FnvHashMap;

/// Stable index of a node inside its arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(pub(crate) usize);

impl NodeId {
    /// The root always occupies slot zero.
    pub(crate) const ROOT: NodeId = NodeId(0);

    pub(crate) fn index(self) -> usize {
        self.0
    }
}

/// A node in the Pattern Trie.
///
/// Each node represents one code point along some inserted pattern. Terminal
/// nodes additionally carry the full text of the pattern that ends there.
#[derive(Debug, Clone, Default)]
pub(crate) struct TrieNode {
    /// Map of code points to child nodes
    pub children: FnvHashMap<char, NodeId>,

    /// Whether some inserted pattern ends at this node
    pub is_terminal: bool,

    /// The complete pattern, present iff `is_terminal`
    pub pattern_text: Option<String>,

    /// Parent node, `None` at the root
    pub parent: Option<NodeId>,

    /// Code point the parent uses to reach this node, `None` at the root
    pub incoming_key: Option<char>,
}

impl TrieNode {
    /// Creates the root node.
    pub fn root() -> Self {
        Self::default()
    }

    /// Creates a node hanging off `parent` under `key`.
    pub fn child_of(parent: NodeId, key: char) -> Self {
        Self {
            parent: Some(parent),
            incoming_key: Some(key),
            ..Self::default()
        }
    }

    /// Marks this node as the end of `pattern`.
    pub fn mark_terminal(&mut self, pattern: &str) {
        self.is_terminal = true;
        self.pattern_text = Some(pattern.to_owned());
    }

    /// Clears the terminal flag and the stored pattern text.
    pub fn clear_terminal(&mut self) {
        self.is_terminal = false;
        self.pattern_text = None;
    }

    /// A non-root node with no children that ends no pattern has no reason to exist.
    pub fn is_dead(&self) -> bool {
        !self.is_terminal && self.children.is_empty()
    }

    /// Resets a released slot so it can be handed out again.
    pub fn reset(&mut self) {
        self.children.clear();
        self.clear_terminal();
        self.parent = None;
        self.incoming_key = None;
    }
}
