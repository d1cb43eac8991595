//! Segment parsing - one brace-free header into sibling elements
//!
//! A header such as `div.card<id:'x'>(Hi)#card p` is scanned one character
//! at a time by a small state machine. Four buffers collect the parts of the
//! declaration being read:
//!
//! ```text
//! TAG    tag.c1.c2
//! PARAM  text between < and >
//! TEXT   text between ( and )
//! ID     text after #
//! ```
//!
//! Whitespace outside a block ends a declaration and flushes it into the
//! sink. Quoted characters never trigger a transition.

use crate::attributes::{parse_attributes, unquote};
use crate::config::ParserConfig;
use crate::cursor::QuoteCursor;
use crate::error::Result;
use dom::ElementSink;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Tag,
    Param,
    Text,
    Id,
    /// Between declarations
    Whitespace,
    /// After a closed `<...>` or `(...)` block
    Detached,
}

/// What a character does in a given mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Add to the current mode's buffer
    Append,
    /// End the declaration
    Flush,
    /// Switch mode, dropping the character
    Enter(Mode),
    /// First character of a new declaration
    Begin,
}

/// Transition table for unquoted characters
pub fn transition(mode: Mode, c: char) -> Step {
    use Mode::*;
    match (mode, c) {
        (Tag | Id | Detached, c) if c <= ' ' => Step::Flush,
        (Tag | Id | Detached, '<') => Step::Enter(Param),
        (Param, '>') => Step::Enter(Detached),
        (Tag | Id | Detached, '(') => Step::Enter(Text),
        (Text, ')') => Step::Enter(Detached),
        (Tag | Detached, '#') => Step::Enter(Id),
        (Whitespace, c) if c > ' ' => Step::Begin,
        _ => Step::Append,
    }
}

#[derive(Debug, Default)]
struct Buffers {
    tag: String,
    param: String,
    text: String,
    id: String,
}

impl Buffers {
    /// Whitespace and Detached have nowhere to put characters.
    fn slot(&mut self, mode: Mode) -> Option<&mut String> {
        match mode {
            Mode::Tag => Some(&mut self.tag),
            Mode::Param => Some(&mut self.param),
            Mode::Text => Some(&mut self.text),
            Mode::Id => Some(&mut self.id),
            Mode::Whitespace | Mode::Detached => None,
        }
    }

    fn is_empty(&self) -> bool {
        self.tag.is_empty() && self.param.is_empty() && self.text.is_empty() && self.id.is_empty()
    }
}

/// Tag spec and attribute block after shorthand expansion
#[derive(Debug, PartialEq, Eq)]
pub struct Declaration {
    pub tag_spec: String,
    pub params: String,
}

/// Rewrite `checkbox.c` into `input.c` with `type:checkbox` ahead of any
/// attributes already written, so an explicit `type` still wins.
pub fn expand_shorthand(tag_spec: String, params: String, config: &ParserConfig) -> Declaration {
    let (name, classes) = match tag_spec.split_once('.') {
        Some((name, classes)) => (name, Some(classes)),
        None => (tag_spec.as_str(), None),
    };
    let folded = name.to_ascii_lowercase();
    if !config.is_input_shorthand(&folded) {
        return Declaration { tag_spec, params };
    }

    let tag_spec = match classes {
        Some(classes) => format!("input.{}", classes),
        None => "input".to_string(),
    };
    let params = if params.is_empty() {
        format!("type:{}", folded)
    } else {
        format!("type:{},{}", folded, params)
    };
    Declaration { tag_spec, params }
}

struct SegmentParser<'a, S: ElementSink> {
    sink: &'a mut S,
    parent: S::Handle,
    config: &'a ParserConfig,
    buffers: Buffers,
    mode: Mode,
    last: Option<S::Handle>,
}

impl<'a, S: ElementSink> SegmentParser<'a, S> {
    fn run(mut self, header: &str) -> Result<Option<S::Handle>> {
        let mut cursor = QuoteCursor::new();

        for c in header.chars() {
            if cursor.feed(c) {
                self.push(c);
                continue;
            }
            match transition(self.mode, c) {
                Step::Append => self.push(c),
                Step::Flush => self.flush()?,
                Step::Enter(mode) => self.mode = mode,
                Step::Begin => {
                    self.mode = Mode::Tag;
                    self.push(c);
                }
            }
        }

        if matches!(self.mode, Mode::Param | Mode::Text) {
            tracing::warn!(
                mode = ?self.mode,
                header,
                "unterminated block, flushing what was read"
            );
        }
        self.flush()?;
        Ok(self.last)
    }

    fn push(&mut self, c: char) {
        if let Some(buffer) = self.buffers.slot(self.mode) {
            buffer.push(c);
        }
    }

    fn flush(&mut self) -> Result<()> {
        self.mode = Mode::Whitespace;
        if self.buffers.is_empty() {
            return Ok(());
        }
        let Buffers {
            tag,
            param,
            text,
            id,
        } = std::mem::take(&mut self.buffers);

        let declaration = expand_shorthand(tag, param, self.config);
        let node = self.sink.insert(self.parent, &declaration.tag_spec)?;
        tracing::trace!(tag_spec = %declaration.tag_spec, "declaration flushed");

        if !declaration.params.is_empty() {
            let attributes = parse_attributes(&declaration.params);
            self.sink.set(node, &attributes)?;
        }
        if !text.is_empty() {
            self.sink.html(node, unquote(text.trim()))?;
        }
        if !id.is_empty() {
            self.sink.register(&id, node)?;
        }

        self.last = Some(node);
        Ok(())
    }
}

/// Parse `header` into children of `parent`.
///
/// Returns the last element created, which is where a following `{...}`
/// block attaches. `None` when the header declared nothing.
pub fn parse_segment<S: ElementSink>(
    sink: &mut S,
    parent: S::Handle,
    header: &str,
    config: &ParserConfig,
) -> Result<Option<S::Handle>> {
    let parser = SegmentParser {
        sink,
        parent,
        config,
        buffers: Buffers::default(),
        mode: Mode::Tag,
        last: None,
    };
    parser.run(header)
}
