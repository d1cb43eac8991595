//! Lookup registry - name a node, find it later
//!
//! Owned by a `Document`, never process-wide, so independent trees can use
//! the same keys without colliding.

use crate::types::NodeId;
use ahash::AHashMap;

#[derive(Debug, Default, Clone)]
pub struct Registry {
    bindings: AHashMap<String, NodeId>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `key` to `node`. Returns the node previously bound to it.
    pub fn register(&mut self, key: &str, node: NodeId) -> Option<NodeId> {
        let previous = self.bindings.insert(key.to_string(), node);
        if let Some(old) = previous.filter(|old| *old != node) {
            tracing::debug!(key, old, new = node, "lookup key rebound");
        }
        previous
    }

    pub fn resolve(&self, key: &str) -> Option<NodeId> {
        self.bindings.get(key).copied()
    }

    pub fn unregister(&mut self, key: &str) -> Option<NodeId> {
        self.bindings.remove(key)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, NodeId)> {
        self.bindings.iter().map(|(k, v)| (k.as_str(), *v))
    }
}
