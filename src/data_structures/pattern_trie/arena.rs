// Copyright (c) 2025 Kapu Authors
//
// Licensed under the MIT License (LICENSE or https://opensource.org/licenses/MIT)

//! Index-addressed node storage for the Pattern Trie.
//!
//! The arena holds every node of one trie in a single `Vec`. Released slots
//! are reset and recycled through a free list, so node ids stay stable for
//! as long as the node is reachable from the root. Dropping the arena
//! releases the whole tree at once.

use super::node::{NodeId, TrieNode};

/// Outcome of removing a pattern from the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Removal {
    /// Number of dead nodes detached while walking back up
    pub pruned: usize,
}

/// Node storage for a single trie.
#[derive(Debug, Clone)]
pub(crate) struct NodeArena {
    nodes: Vec<TrieNode>,
    free_list: Vec<NodeId>,
    pattern_count: usize,
}

impl NodeArena {
    /// Creates an arena holding only the root.
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::root()],
            free_list: Vec::new(),
            pattern_count: 0,
        }
    }

    /// Builds an arena by inserting `words` in order.
    pub fn from_words<I>(words: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut arena = Self::new();
        for word in words {
            arena.insert(word.as_ref());
        }
        arena
    }

    fn node(&self, id: NodeId) -> &TrieNode {
        &self.nodes[id.index()]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut TrieNode {
        &mut self.nodes[id.index()]
    }

    fn alloc(&mut self, node: TrieNode) -> NodeId {
        match self.free_list.pop() {
            Some(id) => {
                self.nodes[id.index()] = node;
                id
            }
            None => {
                self.nodes.push(node);
                NodeId(self.nodes.len() - 1)
            }
        }
    }

    fn release(&mut self, id: NodeId) {
        self.node_mut(id).reset();
        self.free_list.push(id);
    }

    /// Returns the child of `id` reached through `key`.
    pub fn child(&self, id: NodeId, key: char) -> Option<NodeId> {
        self.node(id).children.get(&key).copied()
    }

    /// Number of distinct patterns currently stored.
    pub fn pattern_count(&self) -> usize {
        self.pattern_count
    }

    /// Number of live nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len() - self.free_list.len()
    }

    /// Walks the exact path of `pattern`, returning the node it ends on.
    fn locate(&self, pattern: &str) -> Option<NodeId> {
        pattern
            .chars()
            .try_fold(NodeId::ROOT, |id, key| self.child(id, key))
    }

    /// Inserts `pattern`, creating any missing nodes along its path.
    ///
    /// Returns `true` if the pattern was not already present.
    pub fn insert(&mut self, pattern: &str) -> bool {
        let mut current = NodeId::ROOT;
        for key in pattern.chars() {
            current = match self.child(current, key) {
                Some(next) => next,
                None => {
                    let next = self.alloc(TrieNode::child_of(current, key));
                    self.node_mut(current).children.insert(key, next);
                    next
                }
            };
        }

        let node = self.node_mut(current);
        let is_new = !node.is_terminal;
        node.mark_terminal(pattern);
        if is_new {
            self.pattern_count += 1;
        }
        is_new
    }

    /// Removes `pattern` and prunes every ancestor left dead by the removal.
    ///
    /// Returns `None` when the pattern was not present; the arena is then untouched.
    pub fn delete(&mut self, pattern: &str) -> Option<Removal> {
        let id = self.locate(pattern)?;
        if !self.node(id).is_terminal {
            return None;
        }

        self.node_mut(id).clear_terminal();
        self.pattern_count -= 1;

        Some(Removal {
            pruned: self.prune_upward(id),
        })
    }

    /// Detaches `id` and its ancestors while they are dead, stopping at the root.
    fn prune_upward(&mut self, mut id: NodeId) -> usize {
        let mut pruned = 0;
        while id != NodeId::ROOT && self.node(id).is_dead() {
            let (parent, key) = {
                let node = self.node(id);
                match (node.parent, node.incoming_key) {
                    (Some(parent), Some(key)) => (parent, key),
                    _ => break,
                }
            };

            self.node_mut(parent).children.remove(&key);
            self.release(id);
            pruned += 1;
            id = parent;
        }
        pruned
    }

    /// Returns `true` if `pattern` was inserted and not since deleted.
    pub fn contains_pattern(&self, pattern: &str) -> bool {
        self.locate(pattern)
            .map(|id| self.node(id).is_terminal)
            .unwrap_or(false)
    }

    fn terminal_text(&self, id: NodeId) -> Option<&str> {
        let node = self.node(id);
        if node.is_terminal {
            node.pattern_text.as_deref()
        } else {
            None
        }
    }

    /// Trie substring search: restart a walk from the root at every start
    /// position and stop at the first terminal node reached.
    pub fn find_first_substring(&self, text: &str) -> Option<&str> {
        if let Some(found) = self.terminal_text(NodeId::ROOT) {
            return Some(found);
        }

        for (start, _) in text.char_indices() {
            let mut cursor = NodeId::ROOT;
            for key in text[start..].chars() {
                match self.child(cursor, key) {
                    Some(next) => cursor = next,
                    None => break,
                }
                if let Some(found) = self.terminal_text(cursor) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Single-cursor walk: the cursor advances on a matching child and stays
    /// put on a mismatch. It is never reset to the root.
    pub fn find_first_cursor_walk(&self, text: &str) -> Option<&str> {
        if let Some(found) = self.terminal_text(NodeId::ROOT) {
            return Some(found);
        }

        let mut cursor = NodeId::ROOT;
        for key in text.chars() {
            let Some(next) = self.child(cursor, key) else {
                continue;
            };
            cursor = next;
            if let Some(found) = self.terminal_text(cursor) {
                return Some(found);
            }
        }
        None
    }

    /// Every stored pattern, sorted.
    pub fn patterns(&self) -> Vec<String> {
        let mut patterns = Vec::with_capacity(self.pattern_count);
        let mut stack = vec![NodeId::ROOT];
        while let Some(id) = stack.pop() {
            let node = self.node(id);
            if let Some(text) = self.terminal_text(id) {
                patterns.push(text.to_owned());
            }
            stack.extend(node.children.values().copied());
        }
        patterns.sort_unstable();
        patterns
    }

    /// Checks the structural invariants of the arena.
    #[cfg(test)]
    pub fn assert_consistent(&self) {
        let mut reachable = 0;
        let mut terminals = 0;
        let mut stack = vec![NodeId::ROOT];
        while let Some(id) = stack.pop() {
            let node = self.node(id);
            reachable += 1;
            assert_eq!(node.is_terminal, node.pattern_text.is_some());
            if node.is_terminal {
                terminals += 1;
            }
            if id != NodeId::ROOT {
                assert!(!node.is_dead(), "dead node {id:?} left in the tree");
            }
            for (&key, &child) in &node.children {
                let child_node = self.node(child);
                assert_eq!(child_node.parent, Some(id));
                assert_eq!(child_node.incoming_key, Some(key));
                stack.push(child);
            }
        }
        assert_eq!(reachable, self.node_count());
        assert_eq!(terminals, self.pattern_count);
    }
}

impl Default for NodeArena {
    fn default() -> Self {
        Self::new()
    }
}
