//! Core type definitions for the element tree
//!
//! Key design principles:
//! 1. Use u32 for indices (4 bytes vs 8 bytes pointer)
//! 2. Parent links are plain indices, never owning edges
//! 3. Use SmallVec for small arrays (avoid heap allocation)

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Node identifier (index into arena)
pub type NodeId = u32;

/// Key/value mapping handed to the Set-Attributes contract.
///
/// Keys are unique, so the order in which a mapping is applied never
/// changes the resulting node state.
pub type Attributes = AHashMap<String, String>;

/// Element namespace. Only the SVG/HTML split matters to us.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Namespace {
    #[default]
    Html,
    Svg,
}

impl Namespace {
    pub fn is_svg(&self) -> bool {
        *self == Namespace::Svg
    }
}

/// Inner content assigned directly to an element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Content {
    /// Literal markup, stored verbatim
    Html(String),
    /// Plain text
    Text(String),
}

impl Content {
    pub fn as_str(&self) -> &str {
        match self {
            Content::Html(s) | Content::Text(s) => s,
        }
    }
}

/// Tag name plus class tokens, as written in `tag.c1.c2`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSpec<'a> {
    pub tag: &'a str,
    pub classes: SmallVec<[&'a str; 4]>,
}

impl<'a> TagSpec<'a> {
    /// Split on `.`; empty class tokens are dropped.
    pub fn parse(spec: &'a str) -> Self {
        let mut parts = spec.split('.');
        let tag = parts.next().unwrap_or("");
        let classes = parts.filter(|c| !c.is_empty()).collect();
        Self { tag, classes }
    }
}

/// The tree node
///
/// Design philosophy:
/// - Navigation by index, the arena owns every node
/// - Small collections inline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub node_id: NodeId,
    pub namespace: Namespace,

    // Navigation indices
    pub parent_id: Option<NodeId>,
    pub children_ids: SmallVec<[NodeId; 4]>,

    pub tag_name: String,
    pub classes: SmallVec<[String; 4]>,
    pub properties: AHashMap<String, String>,
    pub style: AHashMap<String, String>,
    pub content: Option<Content>,

    /// Lookup key this node was last registered under
    pub key: Option<String>,
}

impl Node {
    pub fn new(node_id: NodeId, tag_name: String, namespace: Namespace) -> Self {
        Self {
            node_id,
            namespace,
            parent_id: None,
            children_ids: SmallVec::new(),
            tag_name,
            classes: SmallVec::new(),
            properties: AHashMap::new(),
            style: AHashMap::new(),
            content: None,
            key: None,
        }
    }

    /// Get property value
    pub fn prop(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(|s| s.as_str())
    }

    /// Get style value
    pub fn style_value(&self, name: &str) -> Option<&str> {
        self.style.get(name).map(|s| s.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Add a class unless already present
    pub fn add_class(&mut self, class: &str) -> bool {
        if class.is_empty() || self.has_class(class) {
            return false;
        }
        self.classes.push(class.to_string());
        true
    }

    pub fn html(&self) -> Option<&str> {
        match &self.content {
            Some(Content::Html(s)) => Some(s),
            _ => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match &self.content {
            Some(Content::Text(s)) => Some(s),
            _ => None,
        }
    }

    pub fn is_svg(&self) -> bool {
        self.namespace.is_svg()
    }
}
