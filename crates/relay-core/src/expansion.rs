//! Per-viewer expand/collapse state for tree and todo nodes.
//!
//! Kept apart from the conversation log and never serialized with it. Only
//! nodes the viewer toggled are stored; everything else falls back to the
//! kind's default (tree nodes open, todo nodes closed).

use std::collections::HashMap;

/// Which node family a key belongs to. Tree keys and todo IDs live in
/// separate namespaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeFamily {
    Tree,
    Todo,
}

impl NodeFamily {
    #[must_use]
    pub const fn default_expanded(self) -> bool {
        match self {
            Self::Tree => true,
            Self::Todo => false,
        }
    }
}

/// Ephemeral expansion overrides keyed by turn, family, and node key.
#[derive(Debug, Clone, Default)]
pub struct ExpansionState {
    overrides: HashMap<(String, NodeFamily, String), bool>,
}

impl ExpansionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_expanded(&self, turn_id: &str, family: NodeFamily, key: &str) -> bool {
        self.overrides
            .get(&(turn_id.to_string(), family, key.to_string()))
            .copied()
            .unwrap_or_else(|| family.default_expanded())
    }

    /// Flip one node. Siblings and ancestors keep their state.
    pub fn toggle(&mut self, turn_id: &str, family: NodeFamily, key: &str) -> bool {
        let next = !self.is_expanded(turn_id, family, key);
        self.set(turn_id, family, key, next);
        next
    }

    pub fn set(&mut self, turn_id: &str, family: NodeFamily, key: &str, expanded: bool) {
        let slot = (turn_id.to_string(), family, key.to_string());
        if expanded == family.default_expanded() {
            self.overrides.remove(&slot);
        } else {
            self.overrides.insert(slot, expanded);
        }
    }

    /// Forget every override.
    pub fn reset(&mut self) {
        self.overrides.clear();
    }
}
