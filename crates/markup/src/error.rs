//! Error types for markup parsing
//!
//! Only unbalanced braces abort a parse. Everything else in hand-written
//! markup degrades to a best-effort tree.

use dom::DomError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, MarkupError>;

/// Which way a brace failed to match. Positions are byte offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BraceFault {
    #[error("'}}' at {position} has no matching '{{'")]
    ExtraClose { position: usize },

    #[error("'{{' at {position} is never closed")]
    UnclosedOpen { position: usize },
}

#[derive(Debug, Error)]
pub enum MarkupError {
    #[error("Unbalanced braces: {0}")]
    UnbalancedBraces(BraceFault),

    #[error("Tree error: {0}")]
    Dom(#[from] DomError),

    #[error("Invalid parser config: {0}")]
    Config(#[from] serde_json::Error),
}
