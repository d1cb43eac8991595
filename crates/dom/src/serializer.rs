//! Outline serializer - turn a tree into indented, markup-like text
//!
//! Used for debugging and for asserting on whole trees in tests:
//! - one line per element, children indented below
//! - properties and style in sorted order so output is stable
//! - XPath-like paths for pointing at a node

use crate::document::Document;
use crate::error::Result;
use crate::types::*;
use crate::utils;

/// Serializer configuration
#[derive(Debug, Clone)]
pub struct SerializerConfig {
    pub indent: String,
    /// Properties to print; `None` prints all of them
    pub include_properties: Option<Vec<String>>,
    pub max_text_length: usize,
}

impl Default for SerializerConfig {
    fn default() -> Self {
        Self {
            indent: "  ".to_string(),
            include_properties: None,
            max_text_length: 200,
        }
    }
}

enum Visit {
    Open(NodeId, usize),
    Close(NodeId, usize),
}

pub struct OutlineSerializer {
    config: SerializerConfig,
}

impl OutlineSerializer {
    pub fn new() -> Self {
        Self::with_config(SerializerConfig::default())
    }

    pub fn with_config(config: SerializerConfig) -> Self {
        Self { config }
    }

    /// Serialize the whole document
    pub fn serialize(&self, doc: &Document) -> Result<String> {
        self.serialize_from(doc, doc.root())
    }

    /// Serialize the subtree at `start`
    pub fn serialize_from(&self, doc: &Document, start: NodeId) -> Result<String> {
        let mut output = String::with_capacity(256);
        // Iterative walk; a closing entry sits under the node's children
        let mut stack = vec![Visit::Open(start, 0)];

        while let Some(visit) = stack.pop() {
            match visit {
                Visit::Open(node_id, depth) => {
                    let node = doc.get(node_id)?;
                    self.open_tag(node, depth, &mut output);
                    stack.push(Visit::Close(node_id, depth));
                    for &child_id in node.children_ids.iter().rev() {
                        stack.push(Visit::Open(child_id, depth + 1));
                    }
                }
                Visit::Close(node_id, depth) => {
                    let node = doc.get(node_id)?;
                    self.push_indent(depth, &mut output);
                    output.push_str("</");
                    output.push_str(&node.tag_name);
                    output.push_str(">\n");
                }
            }
        }

        Ok(output)
    }

    fn open_tag(&self, node: &Node, depth: usize, output: &mut String) {
        self.push_indent(depth, output);
        output.push('<');
        output.push_str(&node.tag_name);

        if !node.classes.is_empty() {
            output.push_str(&format!(" class=\"{}\"", node.classes.join(" ")));
        }

        let mut properties: Vec<_> = node
            .properties
            .iter()
            .filter(|(name, _)| self.includes(name))
            .collect();
        properties.sort();
        for (name, value) in properties {
            output.push_str(&format!(" {}=\"{}\"", name, value));
        }

        if !node.style.is_empty() {
            let mut style: Vec<_> = node.style.iter().collect();
            style.sort();
            let css: Vec<String> = style.iter().map(|(k, v)| format!("{}:{}", k, v)).collect();
            output.push_str(&format!(" style=\"{}\"", css.join(";")));
        }

        if let Some(key) = &node.key {
            output.push_str(&format!(" #{}", key));
        }
        output.push_str(">\n");

        if let Some(content) = &node.content {
            let text = content.as_str().trim();
            if !text.is_empty() {
                self.push_indent(depth + 1, output);
                output.push_str(&utils::cap_text_length(text, self.config.max_text_length));
                output.push('\n');
            }
        }
    }

    fn push_indent(&self, depth: usize, output: &mut String) {
        for _ in 0..depth {
            output.push_str(&self.config.indent);
        }
    }

    fn includes(&self, name: &str) -> bool {
        match &self.config.include_properties {
            Some(names) => names.iter().any(|n| n == name),
            None => true,
        }
    }

    /// XPath-style location of a node, e.g. `/body[1]/div[2]`
    pub fn generate_xpath(&self, doc: &Document, node_id: NodeId) -> Result<String> {
        let mut path_parts = Vec::new();
        let mut current_id = Some(node_id);

        while let Some(id) = current_id {
            let node = doc.get(id)?;

            // Position among siblings with the same tag name
            let position = match node.parent_id {
                Some(parent_id) => doc
                    .children(parent_id)?
                    .iter()
                    .filter_map(|&child_id| doc.get(child_id).ok())
                    .filter(|child| child.tag_name == node.tag_name)
                    .position(|child| child.node_id == node.node_id)
                    .map(|p| p + 1) // XPath is 1-indexed
                    .unwrap_or(1),
                None => 1,
            };

            path_parts.push(format!("{}[{}]", node.tag_name, position));
            current_id = node.parent_id;
        }

        path_parts.reverse();
        Ok(format!("/{}", path_parts.join("/")))
    }
}

impl Default for OutlineSerializer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_simple_tree() {
        let mut doc = Document::new();
        let card = doc.insert(doc.root(), "div.card").unwrap();
        doc.get_mut(card)
            .unwrap()
            .properties
            .insert("id".to_string(), "x".to_string());
        let title = doc.insert(card, "h1").unwrap();
        doc.html(title, "Title").unwrap();
        doc.register(title, "head").unwrap();

        let output = OutlineSerializer::new().serialize(&doc).unwrap();
        let expected = "\
<body>
  <div class=\"card\" id=\"x\">
    <h1 #head>
      Title
    </h1>
  </div>
</body>
";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_include_properties_filter() {
        let mut doc = Document::new();
        let input = doc.insert(doc.root(), "input").unwrap();
        let node = doc.get_mut(input).unwrap();
        node.properties.insert("type".to_string(), "text".to_string());
        node.properties.insert("secret".to_string(), "s".to_string());

        let serializer = OutlineSerializer::with_config(SerializerConfig {
            include_properties: Some(vec!["type".to_string()]),
            ..SerializerConfig::default()
        });
        let output = serializer.serialize_from(&doc, input).unwrap();
        assert_eq!(output, "<input type=\"text\">\n</input>\n");
    }

    #[test]
    fn test_generate_xpath() {
        let mut doc = Document::new();
        let root = doc.root();
        doc.insert(root, "div").unwrap();
        let second = doc.insert(root, "div").unwrap();
        let span = doc.insert(second, "span").unwrap();

        let xpath = OutlineSerializer::new().generate_xpath(&doc, span).unwrap();
        assert_eq!(xpath, "/body[1]/div[2]/span[1]");
    }

    #[test]
    fn test_deep_tree_serializes() {
        let depth = 50_000;
        let mut doc = Document::new();
        let mut parent = doc.root();
        for _ in 0..depth {
            parent = doc.insert(parent, "i").unwrap();
        }

        let serializer = OutlineSerializer::with_config(SerializerConfig {
            indent: String::new(),
            ..SerializerConfig::default()
        });
        let output = serializer.serialize(&doc).unwrap();
        assert_eq!(output.lines().count(), 2 * (depth + 1));
        assert!(output.starts_with("<body>\n<i>\n"));
        assert!(output.ends_with("</i>\n</body>\n"));
    }
}
