//! Document - main entry point for tree operations
//!
//! Owns the node arena and the lookup registry. Every mutating call takes
//! a node id and hands back a node id, so calls chain:
//!
//! ```ignore
//! let mut doc = Document::new();
//! let card = doc.insert(doc.root(), "div.card")?;
//! let title = doc.insert(card, "h1")?;
//! doc.text(title, "Hello")?;
//! doc.register(title, "title")?;
//! ```

use crate::arena::NodeArena;
use crate::error::{DomError, Result};
use crate::registry::Registry;
use crate::sink::ElementSink;
use crate::types::*;
use crate::utils;
use serde::Serialize;

/// Configuration for a document
#[derive(Debug, Clone)]
pub struct DocumentConfig {
    /// Pre-allocated node slots
    pub capacity: usize,
    /// Tag of the root element every tree hangs off
    pub root_tag: String,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            capacity: 64,
            root_tag: "body".to_string(),
        }
    }
}

/// A tree of elements plus the registry of named nodes
#[derive(Debug)]
pub struct Document {
    arena: NodeArena,
    registry: Registry,
    root: NodeId,
}

#[derive(Serialize)]
struct Snapshot<'a> {
    root: NodeId,
    nodes: Vec<&'a Node>,
}

impl Document {
    /// Create new document with default config
    pub fn new() -> Self {
        Self::with_config(DocumentConfig::default())
    }

    /// Create document with custom config
    pub fn with_config(config: DocumentConfig) -> Self {
        let mut arena = NodeArena::with_capacity(config.capacity);
        let root = arena.alloc(config.root_tag.to_ascii_lowercase(), Namespace::Html);
        Self {
            arena,
            registry: Registry::new(),
            root,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn get(&self, node: NodeId) -> Result<&Node> {
        self.arena.get(node)
    }

    pub fn get_mut(&mut self, node: NodeId) -> Result<&mut Node> {
        self.arena.get_mut(node)
    }

    /// Number of nodes ever created, root included
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Allocate a detached element for `tag.c1.c2` under `parent`'s namespace
    fn create(&mut self, tag_spec: &str, parent: NodeId) -> Result<NodeId> {
        let spec = TagSpec::parse(tag_spec);
        let tag = spec.tag.to_ascii_lowercase();
        let namespace = if self.arena.get(parent)?.is_svg() || tag == "svg" {
            Namespace::Svg
        } else {
            Namespace::Html
        };

        let id = self.arena.alloc(tag, namespace);
        let node = self.arena.get_mut(id)?;
        for class in spec.classes {
            node.add_class(class);
        }
        tracing::trace!(id, tag = %node.tag_name, ?namespace, "element created");
        Ok(id)
    }

    /// Insert a new element as the last child of `parent`
    pub fn insert(&mut self, parent: NodeId, tag_spec: &str) -> Result<NodeId> {
        let id = self.create(tag_spec, parent)?;
        self.arena.attach(parent, id, usize::MAX)?;
        Ok(id)
    }

    /// Insert, then apply `attributes`
    pub fn insert_with(
        &mut self,
        parent: NodeId,
        tag_spec: &str,
        attributes: &Attributes,
    ) -> Result<NodeId> {
        let id = self.insert(parent, tag_spec)?;
        self.set(id, attributes)
    }

    /// Add a new element as the next sibling of `node`
    pub fn append(&mut self, node: NodeId, tag_spec: &str) -> Result<NodeId> {
        let (parent, index) = self.position(node)?;
        let id = self.create(tag_spec, parent)?;
        self.arena.attach(parent, id, index + 1)?;
        Ok(id)
    }

    /// Add a new element as the previous sibling of `node`
    pub fn prepend(&mut self, node: NodeId, tag_spec: &str) -> Result<NodeId> {
        let (parent, index) = self.position(node)?;
        let id = self.create(tag_spec, parent)?;
        self.arena.attach(parent, id, index)?;
        Ok(id)
    }

    fn position(&self, node: NodeId) -> Result<(NodeId, usize)> {
        self.arena
            .index_in_parent(node)?
            .ok_or(DomError::NoParent(node))
    }

    /// Set-Attributes contract.
    ///
    /// `class` adds each `.`-separated token, `style` assigns each
    /// `name:value` clause of a `;`-separated list, anything else is stored
    /// as a property.
    pub fn set(&mut self, node: NodeId, attributes: &Attributes) -> Result<NodeId> {
        let target = self.arena.get_mut(node)?;
        for (key, value) in attributes.iter() {
            match key.as_str() {
                "class" => {
                    for class in utils::class_tokens(value) {
                        target.add_class(class);
                    }
                }
                "style" => {
                    for (name, value) in utils::style_clauses(value) {
                        target.style.insert(name.to_string(), value.to_string());
                    }
                }
                _ => {
                    target.properties.insert(key.clone(), value.clone());
                }
            }
        }
        Ok(node)
    }

    /// Assign style properties directly
    pub fn style(&mut self, node: NodeId, properties: &Attributes) -> Result<NodeId> {
        let target = self.arena.get_mut(node)?;
        for (name, value) in properties.iter() {
            target.style.insert(name.clone(), value.clone());
        }
        Ok(node)
    }

    /// Replace the whole inline style with `name:value;...` text
    pub fn css(&mut self, node: NodeId, css_text: &str) -> Result<NodeId> {
        let target = self.arena.get_mut(node)?;
        target.style.clear();
        for (name, value) in utils::style_clauses(css_text) {
            target.style.insert(name.to_string(), value.to_string());
        }
        Ok(node)
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) -> Result<NodeId> {
        self.arena.get_mut(node)?.add_class(class);
        Ok(node)
    }

    /// Remove one class, or every class when `class` is `None`
    pub fn remove_class(&mut self, node: NodeId, class: Option<&str>) -> Result<NodeId> {
        let target = self.arena.get_mut(node)?;
        match class {
            Some(class) => target.classes.retain(|c| c.as_str() != class),
            None => target.classes.clear(),
        }
        Ok(node)
    }

    pub fn html(&mut self, node: NodeId, value: &str) -> Result<NodeId> {
        self.arena.get_mut(node)?.content = Some(Content::Html(value.to_string()));
        Ok(node)
    }

    pub fn text(&mut self, node: NodeId, value: &str) -> Result<NodeId> {
        self.arena.get_mut(node)?.content = Some(Content::Text(value.to_string()));
        Ok(node)
    }

    pub fn children(&self, node: NodeId) -> Result<&[NodeId]> {
        Ok(self.arena.get(node)?.children_ids.as_slice())
    }

    /// The `index`-th child; negative indices count from the end
    pub fn child(&self, node: NodeId, index: i32) -> Result<NodeId> {
        let children = self.children(node)?;
        let resolved = if index < 0 {
            children.len().checked_sub(index.unsigned_abs() as usize)
        } else {
            Some(index as usize)
        };
        resolved
            .and_then(|i| children.get(i).copied())
            .ok_or(DomError::ChildOutOfRange { node, index })
    }

    pub fn parent(&self, node: NodeId) -> Result<Option<NodeId>> {
        Ok(self.arena.parent(node)?.map(|parent| parent.node_id))
    }

    /// Walk `levels` parents up (0 behaves like 1)
    pub fn up(&self, node: NodeId, levels: usize) -> Result<NodeId> {
        let mut current = node;
        for _ in 0..levels.max(1) {
            current = self
                .arena
                .get(current)?
                .parent_id
                .ok_or(DomError::NoParent(current))?;
        }
        Ok(current)
    }

    /// Bind `key` to `node`, replacing any earlier binding
    pub fn register(&mut self, node: NodeId, key: &str) -> Result<NodeId> {
        self.arena.get(node)?;
        if let Some(old) = self.registry.register(key, node) {
            if old != node {
                if let Ok(previous) = self.arena.get_mut(old) {
                    if previous.key.as_deref() == Some(key) {
                        previous.key = None;
                    }
                }
            }
        }
        self.arena.get_mut(node)?.key = Some(key.to_string());
        Ok(node)
    }

    pub fn resolve(&self, key: &str) -> Option<NodeId> {
        self.registry.resolve(key)
    }

    pub fn resolve_node(&self, key: &str) -> Option<&Node> {
        self.resolve(key).and_then(|id| self.arena.get(id).ok())
    }

    /// All nodes of the subtree at `start`, depth-first, `start` included
    pub fn descendants(&self, start: NodeId) -> Result<Vec<NodeId>> {
        self.arena.find(start, |_| true)
    }

    pub fn find<F>(&self, start: NodeId, predicate: F) -> Result<Vec<NodeId>>
    where
        F: Fn(&Node) -> bool,
    {
        self.arena.find(start, predicate)
    }

    pub fn find_by_tag(&self, start: NodeId, tag: &str) -> Result<Vec<NodeId>> {
        self.arena.find_by_tag(start, tag)
    }

    /// Drop all content and children of `node`. Keys held inside the
    /// dropped subtrees are unregistered.
    pub fn clear(&mut self, node: NodeId) -> Result<NodeId> {
        let children = std::mem::take(&mut self.arena.get_mut(node)?.children_ids);
        for child in children {
            self.arena.get_mut(child)?.parent_id = None;
            self.release_keys(child)?;
        }
        self.arena.get_mut(node)?.content = Some(Content::Html(String::new()));
        Ok(node)
    }

    /// Detach `node` (and its subtree) from the tree, unregistering any
    /// keys held inside it
    pub fn remove(&mut self, node: NodeId) -> Result<()> {
        if node == self.root {
            return Err(DomError::CannotRemoveRoot(node));
        }
        self.arena.detach(node)?;
        self.release_keys(node)
    }

    fn release_keys(&mut self, start: NodeId) -> Result<()> {
        for id in self.arena.find(start, |node| node.key.is_some())? {
            let held = self.arena.get_mut(id)?;
            if let Some(key) = held.key.take() {
                if self.registry.resolve(&key) == Some(id) {
                    self.registry.unregister(&key);
                    tracing::debug!(key = %key, node = id, "lookup key released");
                }
            }
        }
        Ok(())
    }

    /// JSON snapshot of the nodes reachable from the root
    pub fn to_json(&self) -> Result<String> {
        let nodes = self
            .descendants(self.root)?
            .into_iter()
            .map(|id| self.arena.get(id))
            .collect::<Result<Vec<_>>>()?;
        let snapshot = Snapshot {
            root: self.root,
            nodes,
        };
        Ok(serde_json::to_string(&snapshot)?)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementSink for Document {
    type Handle = NodeId;

    fn insert(&mut self, parent: NodeId, tag_spec: &str) -> Result<NodeId> {
        Document::insert(self, parent, tag_spec)
    }

    fn set(&mut self, node: NodeId, attributes: &Attributes) -> Result<()> {
        Document::set(self, node, attributes).map(|_| ())
    }

    fn html(&mut self, node: NodeId, html: &str) -> Result<()> {
        Document::html(self, node, html).map(|_| ())
    }

    fn register(&mut self, key: &str, node: NodeId) -> Result<()> {
        Document::register(self, node, key).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> Attributes {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_insert_with_classes() {
        let mut doc = Document::new();
        let root = doc.root();
        let card = doc.insert(root, "DIV.card.wide").unwrap();

        let node = doc.get(card).unwrap();
        assert_eq!(node.tag_name, "div");
        assert_eq!(node.classes.as_slice(), &["card", "wide"]);
        assert_eq!(node.parent_id, Some(root));
        assert_eq!(doc.children(root).unwrap(), &[card]);
    }

    #[test]
    fn test_insert_with_attributes() {
        let mut doc = Document::new();
        let root = doc.root();
        let field = doc
            .insert_with(
                root,
                "input.wide",
                &attrs(&[
                    ("class", "big.bold"),
                    ("style", "width:10px"),
                    ("name", "email"),
                ]),
            )
            .unwrap();

        assert_eq!(doc.children(root).unwrap(), &[field]);
        let node = doc.get(field).unwrap();
        assert_eq!(node.classes.as_slice(), &["wide", "big", "bold"]);
        assert_eq!(node.style_value("width"), Some("10px"));
        assert_eq!(node.prop("name"), Some("email"));
        assert_eq!(node.properties.len(), 1);
    }

    #[test]
    fn test_svg_namespace_inherits() {
        let mut doc = Document::new();
        let svg = doc.insert(doc.root(), "svg").unwrap();
        let circle = doc.insert(svg, "circle").unwrap();
        let div = doc.insert(doc.root(), "div").unwrap();

        assert!(doc.get(svg).unwrap().is_svg());
        assert!(doc.get(circle).unwrap().is_svg());
        assert!(!doc.get(div).unwrap().is_svg());
    }

    #[test]
    fn test_set_attributes_contract() {
        let mut doc = Document::new();
        let el = doc.insert(doc.root(), "p.a").unwrap();
        doc.set(
            el,
            &attrs(&[
                ("class", "b.c"),
                ("style", "color:red;nocolon;margin : 0"),
                ("title", "hi"),
            ]),
        )
        .unwrap();

        let node = doc.get(el).unwrap();
        assert_eq!(node.classes.as_slice(), &["a", "b", "c"]);
        assert_eq!(node.style_value("color"), Some("red"));
        assert_eq!(node.style_value("margin"), Some("0"));
        assert_eq!(node.style.len(), 2);
        assert_eq!(node.prop("title"), Some("hi"));
        assert_eq!(node.prop("class"), None);
    }

    #[test]
    fn test_set_order_independent() {
        let mapping = attrs(&[("class", "x"), ("value", "1"), ("style", "top:0")]);
        let mut entries: Vec<_> = mapping.iter().collect();

        let mut forward = Document::new();
        let a = forward.insert(forward.root(), "input").unwrap();
        for (k, v) in &entries {
            forward.set(a, &attrs(&[(k.as_str(), v.as_str())])).unwrap();
        }

        entries.reverse();
        let mut backward = Document::new();
        let b = backward.insert(backward.root(), "input").unwrap();
        for (k, v) in &entries {
            backward.set(b, &attrs(&[(k.as_str(), v.as_str())])).unwrap();
        }

        let (na, nb) = (forward.get(a).unwrap(), backward.get(b).unwrap());
        assert_eq!(na.classes, nb.classes);
        assert_eq!(*na.properties, *nb.properties);
        assert_eq!(*na.style, *nb.style);
    }

    #[test]
    fn test_sibling_insertion() {
        let mut doc = Document::new();
        let root = doc.root();
        let middle = doc.insert(root, "b").unwrap();
        let after = doc.append(middle, "i").unwrap();
        let before = doc.prepend(middle, "u").unwrap();

        assert_eq!(doc.children(root).unwrap(), &[before, middle, after]);
        assert!(matches!(doc.append(root, "x"), Err(DomError::NoParent(_))));
    }

    #[test]
    fn test_child_indexing() {
        let mut doc = Document::new();
        let root = doc.root();
        let first = doc.insert(root, "a").unwrap();
        let last = doc.insert(root, "b").unwrap();

        assert_eq!(doc.child(root, 0).unwrap(), first);
        assert_eq!(doc.child(root, -1).unwrap(), last);
        assert_eq!(doc.child(root, -2).unwrap(), first);
        assert!(matches!(
            doc.child(root, 2),
            Err(DomError::ChildOutOfRange { index: 2, .. })
        ));
        assert!(doc.child(root, -3).is_err());
    }

    #[test]
    fn test_up_levels() {
        let mut doc = Document::new();
        let root = doc.root();
        let a = doc.insert(root, "div").unwrap();
        let b = doc.insert(a, "div").unwrap();
        let c = doc.insert(b, "span").unwrap();

        assert_eq!(doc.up(c, 0).unwrap(), b);
        assert_eq!(doc.up(c, 1).unwrap(), b);
        assert_eq!(doc.up(c, 3).unwrap(), root);
        assert!(matches!(doc.up(c, 4), Err(DomError::NoParent(_))));
    }

    #[test]
    fn test_register_and_resolve() {
        let mut doc = Document::new();
        let a = doc.insert(doc.root(), "a").unwrap();
        let b = doc.insert(doc.root(), "b").unwrap();

        doc.register(a, "link").unwrap();
        assert_eq!(doc.resolve("link"), Some(a));
        doc.register(b, "link").unwrap();
        assert_eq!(doc.resolve("link"), Some(b));
        assert_eq!(doc.get(a).unwrap().key, None);
        assert_eq!(doc.get(b).unwrap().key.as_deref(), Some("link"));
        assert_eq!(doc.resolve_node("link").unwrap().tag_name, "b");
        assert!(doc.resolve("missing").is_none());
    }

    #[test]
    fn test_registries_are_per_document() {
        let mut one = Document::new();
        let mut two = Document::new();
        let x = one.insert(one.root(), "x").unwrap();
        two.insert(two.root(), "y").unwrap();
        one.register(x, "k").unwrap();
        assert!(two.resolve("k").is_none());
    }

    #[test]
    fn test_clear_and_remove() {
        let mut doc = Document::new();
        let root = doc.root();
        let list = doc.insert(root, "ul").unwrap();
        let item = doc.insert(list, "li").unwrap();
        doc.insert(list, "li").unwrap();

        doc.clear(list).unwrap();
        assert!(doc.children(list).unwrap().is_empty());
        assert_eq!(doc.parent(item).unwrap(), None);
        assert_eq!(doc.get(list).unwrap().html(), Some(""));

        doc.remove(list).unwrap();
        assert!(doc.children(root).unwrap().is_empty());
        assert!(matches!(doc.remove(root), Err(DomError::CannotRemoveRoot(_))));
    }

    #[test]
    fn test_detached_keys_are_released() {
        let mut doc = Document::new();
        let root = doc.root();
        let menu = doc.insert(root, "nav").unwrap();
        let link = doc.insert(menu, "a").unwrap();
        doc.register(menu, "menu").unwrap();
        doc.register(link, "home").unwrap();

        let list = doc.insert(root, "ul").unwrap();
        let item = doc.insert(list, "li").unwrap();
        doc.register(item, "first").unwrap();
        doc.register(list, "list").unwrap();

        doc.remove(menu).unwrap();
        assert!(doc.resolve("menu").is_none());
        assert!(doc.resolve("home").is_none());
        assert_eq!(doc.get(link).unwrap().key, None);

        doc.clear(list).unwrap();
        assert!(doc.resolve("first").is_none());
        assert_eq!(doc.resolve("list"), Some(list));
        assert_eq!(doc.registry().len(), 1);
    }

    #[test]
    fn test_class_removal() {
        let mut doc = Document::new();
        let el = doc.insert(doc.root(), "div.a.b.c").unwrap();
        doc.remove_class(el, Some("b")).unwrap();
        assert_eq!(doc.get(el).unwrap().classes.as_slice(), &["a", "c"]);
        doc.remove_class(el, None).unwrap();
        assert!(doc.get(el).unwrap().classes.is_empty());
    }

    #[test]
    fn test_css_replaces_style() {
        let mut doc = Document::new();
        let el = doc.insert(doc.root(), "div").unwrap();
        doc.style(el, &attrs(&[("color", "red")])).unwrap();
        doc.css(el, "width: 10px; height: 5px").unwrap();

        let node = doc.get(el).unwrap();
        assert_eq!(node.style_value("color"), None);
        assert_eq!(node.style_value("width"), Some("10px"));
        assert_eq!(node.style_value("height"), Some("5px"));
    }

    #[test]
    fn test_to_json_skips_detached() {
        let mut doc = Document::new();
        let kept = doc.insert(doc.root(), "main").unwrap();
        let gone = doc.insert(doc.root(), "aside").unwrap();
        doc.text(kept, "hi").unwrap();
        doc.remove(gone).unwrap();

        let json: serde_json::Value = serde_json::from_str(&doc.to_json().unwrap()).unwrap();
        let nodes = json["nodes"].as_array().unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[1]["tag_name"], "main");
        assert_eq!(nodes[1]["content"]["kind"], "text");
    }
}
