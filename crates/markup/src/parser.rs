//! Parser - markup string in, element tree out
//!
//! ```text
//! text ─→ BraceTable::match_braces ─→ TreeBuilder::build ─→ ElementSink
//!           (fails before any node)      (segment per header)
//! ```

use crate::braces::BraceTable;
use crate::builder::TreeBuilder;
use crate::config::ParserConfig;
use crate::error::Result;
use dom::{Document, ElementSink, NodeId};

#[derive(Debug, Clone, Default)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse `text` into children of `parent`. Returns `parent` for chaining.
    ///
    /// Unbalanced braces fail the whole call and leave the sink untouched.
    pub fn parse<S: ElementSink>(
        &self,
        sink: &mut S,
        parent: S::Handle,
        text: &str,
    ) -> Result<S::Handle> {
        let braces = BraceTable::match_braces(text)?;
        tracing::debug!(bytes = text.len(), blocks = braces.len(), "parsing markup");

        TreeBuilder::new(text, &braces, &self.config, sink).build(parent, 0, text.len())?;
        Ok(parent)
    }
}

/// Parse with the default configuration
pub fn parse<S: ElementSink>(sink: &mut S, parent: S::Handle, text: &str) -> Result<S::Handle> {
    Parser::new().parse(sink, parent, text)
}

/// Run only the brace pass, for callers that want to reject bad input
/// before touching any tree.
pub fn check(text: &str) -> Result<BraceTable> {
    BraceTable::match_braces(text)
}

/// Chained parsing straight off a document
pub trait DocumentExt {
    fn parse_markup(&mut self, parent: NodeId, text: &str) -> Result<NodeId>;
}

impl DocumentExt for Document {
    fn parse_markup(&mut self, parent: NodeId, text: &str) -> Result<NodeId> {
        parse(self, parent, text)
    }
}
