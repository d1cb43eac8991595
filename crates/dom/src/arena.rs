//! Arena-based tree storage
//!
//! Every node lives in one `Vec<Node>`; a node's identity is its index.
//! Children are owned through `children_ids`, the parent link is a plain
//! index and never keeps anything alive.
//!
//! ## Memory Layout
//!
//! ```text
//! Arena: Vec<Node>
//!        [Node0][Node1][Node2]...
//!         ↑ 4-byte index, not 8-byte pointer
//! ```
//!
//! Nodes are never freed individually. A removed subtree stays in the arena
//! detached (`parent_id == None`) and is unreachable from the root.

use crate::error::{DomError, Result};
use crate::types::{Namespace, Node, NodeId};

#[derive(Debug)]
pub struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    /// Create a new empty arena
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    /// Create arena with specific capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Allocate a detached node, returns its ID
    pub fn alloc(&mut self, tag_name: String, namespace: Namespace) -> NodeId {
        let node_id = self.nodes.len() as NodeId;
        self.nodes.push(Node::new(node_id, tag_name, namespace));
        node_id
    }

    /// Get node by ID (immutable)
    pub fn get(&self, node_id: NodeId) -> Result<&Node> {
        self.nodes
            .get(node_id as usize)
            .ok_or(DomError::NodeNotFound(node_id))
    }

    /// Get node by ID (mutable)
    pub fn get_mut(&mut self, node_id: NodeId) -> Result<&mut Node> {
        self.nodes
            .get_mut(node_id as usize)
            .ok_or(DomError::NodeNotFound(node_id))
    }

    /// Total number of nodes, detached ones included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Attach `child` under `parent` at `index` (clamped to the end)
    pub fn attach(&mut self, parent: NodeId, child: NodeId, index: usize) -> Result<()> {
        self.get(child)?;
        let parent_node = self.get_mut(parent)?;
        let index = index.min(parent_node.children_ids.len());
        parent_node.children_ids.insert(index, child);
        self.get_mut(child)?.parent_id = Some(parent);
        Ok(())
    }

    /// Unlink `child` from its parent. Returns the former parent, if any.
    pub fn detach(&mut self, child: NodeId) -> Result<Option<NodeId>> {
        let Some(parent) = self.get_mut(child)?.parent_id.take() else {
            return Ok(None);
        };
        let parent_node = self.get_mut(parent)?;
        parent_node.children_ids.retain(|id| *id != child);
        Ok(Some(parent))
    }

    /// Position of `child` within its parent's child list
    pub fn index_in_parent(&self, child: NodeId) -> Result<Option<(NodeId, usize)>> {
        let Some(parent) = self.get(child)?.parent_id else {
            return Ok(None);
        };
        let index = self
            .get(parent)?
            .children_ids
            .iter()
            .position(|id| *id == child);
        Ok(index.map(|i| (parent, i)))
    }

    /// Parent node, `None` for a root or a detached node
    pub fn parent(&self, node_id: NodeId) -> Result<Option<&Node>> {
        let node = self.get(node_id)?;
        match node.parent_id {
            Some(parent_id) => Ok(Some(self.get(parent_id)?)),
            None => Ok(None),
        }
    }

    /// Traverse a subtree depth-first (iterative, no recursion)
    pub fn traverse_df<F>(&self, start_id: NodeId, mut visit: F) -> Result<()>
    where
        F: FnMut(&Node) -> Result<()>,
    {
        let mut stack = vec![start_id];

        while let Some(node_id) = stack.pop() {
            let node = self.get(node_id)?;
            visit(node)?;

            // Push children in reverse order (so they're visited left-to-right)
            for &child_id in node.children_ids.iter().rev() {
                stack.push(child_id);
            }
        }

        Ok(())
    }

    /// Find nodes in a subtree matching predicate, in document order
    pub fn find<F>(&self, start_id: NodeId, predicate: F) -> Result<Vec<NodeId>>
    where
        F: Fn(&Node) -> bool,
    {
        let mut found = Vec::new();
        self.traverse_df(start_id, |node| {
            if predicate(node) {
                found.push(node.node_id);
            }
            Ok(())
        })?;
        Ok(found)
    }

    /// Find all elements by tag name
    pub fn find_by_tag(&self, start_id: NodeId, tag: &str) -> Result<Vec<NodeId>> {
        self.find(start_id, |node| node.tag_name.eq_ignore_ascii_case(tag))
    }
}

impl Default for NodeArena {
    fn default() -> Self {
        Self::new()
    }
}
