//! Tree building - the second pass
//!
//! Walks the brace table with an explicit work stack instead of recursion,
//! so nesting depth is bounded by memory rather than the call stack. At each
//! level the text up to the next `{` is a header: its declarations become
//! children of the current parent and the last of them receives the brace
//! block's contents.

use crate::braces::BraceTable;
use crate::config::ParserConfig;
use crate::error::Result;
use crate::segment::parse_segment;
use dom::ElementSink;

/// A range of text still to be built into `parent`
struct Frame<H> {
    parent: H,
    start: usize,
    end: usize,
}

pub(crate) struct TreeBuilder<'a, S: ElementSink> {
    text: &'a str,
    braces: &'a BraceTable,
    config: &'a ParserConfig,
    sink: &'a mut S,
}

impl<'a, S: ElementSink> TreeBuilder<'a, S> {
    pub(crate) fn new(
        text: &'a str,
        braces: &'a BraceTable,
        config: &'a ParserConfig,
        sink: &'a mut S,
    ) -> Self {
        Self {
            text,
            braces,
            config,
            sink,
        }
    }

    /// Build `text[start..end]` into `parent`
    pub(crate) fn build(&mut self, parent: S::Handle, start: usize, end: usize) -> Result<()> {
        let text = self.text;
        let mut stack = vec![Frame { parent, start, end }];

        while let Some(Frame { parent, start: pos, end }) = stack.pop() {
            if pos >= end {
                continue;
            }

            // Inclusive lower bound: a `{` right at `pos` has an empty header,
            // which is how `}{` and a leading `{` reach the shared parent.
            let Some(id) = self.braces.first_open_in(pos, end) else {
                let header = text[pos..end].trim();
                if !header.is_empty() {
                    parse_segment(&mut *self.sink, parent, header, self.config)?;
                }
                continue;
            };

            let (open, close) = (self.braces.open(id), self.braces.close(id));
            let header = text[pos..open].trim();
            let target = if header.is_empty() {
                parent
            } else {
                parse_segment(&mut *self.sink, parent, header, self.config)?
                    .unwrap_or(parent)
            };

            // Resume this level after the block, but only once the block
            // itself has been built, to keep sink calls in source order.
            stack.push(Frame {
                parent,
                start: close + 1,
                end,
            });
            stack.push(Frame {
                parent: target,
                start: open + 1,
                end: close,
            });
        }

        Ok(())
    }
}
