//! Error types for tree operations
//!
//! Simple, flat error hierarchy. No over-engineering.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DomError>;

#[derive(Debug, Error)]
pub enum DomError {
    #[error("Node not found: {0}")]
    NodeNotFound(u32),

    #[error("Node {0} has no parent")]
    NoParent(u32),

    #[error("Node {node} has no child at index {index}")]
    ChildOutOfRange { node: u32, index: i32 },

    #[error("Cannot remove the document root ({0})")]
    CannotRemoveRoot(u32),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
