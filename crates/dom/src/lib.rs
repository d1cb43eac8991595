//! Element tree with chained construction
//!
//! ## Core Design
//!
//! ```text
//! Document ─┬─ NodeArena (owns every Node, NodeId = u32 index)
//!           └─ Registry  (lookup key → NodeId)
//! ```
//!
//! Children are owned through id lists; the parent link is an id and never
//! owns anything. Tree builders (the markup parser) drive a document
//! through the `ElementSink` trait.

pub mod arena;
pub mod document;
pub mod error;
pub mod registry;
pub mod serializer;
pub mod sink;
pub mod types;
pub mod utils;

pub use arena::NodeArena;
pub use document::{Document, DocumentConfig};
pub use error::{DomError, Result};
pub use registry::Registry;
pub use serializer::{OutlineSerializer, SerializerConfig};
pub use sink::ElementSink;
pub use types::*;
