//! Element sink - the seam between a tree builder and the tree it feeds
//!
//! The markup parser only ever talks to this trait, so it can drive a
//! `Document`, a recording double in tests, or any other tree.

use crate::error::Result;
use crate::types::Attributes;

pub trait ElementSink {
    /// Handle to a node owned by the sink
    type Handle: Copy;

    /// Create an element from `tag.c1.c2` and append it as the last child
    /// of `parent`.
    fn insert(&mut self, parent: Self::Handle, tag_spec: &str) -> Result<Self::Handle>;

    /// Apply the Set-Attributes contract.
    fn set(&mut self, node: Self::Handle, attributes: &Attributes) -> Result<()>;

    /// Assign a literal inner-HTML payload.
    fn html(&mut self, node: Self::Handle, html: &str) -> Result<()>;

    /// Bind `key` to `node` in the sink's lookup registry.
    fn register(&mut self, key: &str, node: Self::Handle) -> Result<()>;
}
