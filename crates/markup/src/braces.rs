//! Brace matching - the first of the two passes
//!
//! One linear, quote-aware scan that pairs every `{` with its `}`. It runs
//! to completion before a single node is created, so a brace error leaves
//! the target tree untouched.

use crate::cursor::QuoteCursor;
use crate::error::{BraceFault, MarkupError, Result};

/// Matched `{...}` spans, indexed by pair id.
///
/// Ids are handed out at the opening brace, so id order is source order of
/// the opens, and `open` is sorted ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BraceTable {
    open: Vec<usize>,
    close: Vec<usize>,
}

impl BraceTable {
    pub fn match_braces(text: &str) -> Result<Self> {
        let mut cursor = QuoteCursor::new();
        let mut table = BraceTable::default();
        let mut stack: Vec<usize> = Vec::new();

        for (i, c) in text.char_indices() {
            if cursor.feed(c) {
                continue;
            }
            match c {
                '{' => {
                    stack.push(table.open.len());
                    table.open.push(i);
                    table.close.push(i);
                }
                '}' => {
                    let id = stack.pop().ok_or(MarkupError::UnbalancedBraces(
                        BraceFault::ExtraClose { position: i },
                    ))?;
                    table.close[id] = i;
                }
                _ => {}
            }
        }

        if let Some(&id) = stack.last() {
            return Err(MarkupError::UnbalancedBraces(BraceFault::UnclosedOpen {
                position: table.open[id],
            }));
        }

        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    pub fn open(&self, id: usize) -> usize {
        self.open[id]
    }

    pub fn close(&self, id: usize) -> usize {
        self.close[id]
    }

    /// `(open, close)` pairs in id order
    pub fn spans(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.open.iter().copied().zip(self.close.iter().copied())
    }

    /// First pair whose opening brace lies in `[pos, end)`
    pub fn first_open_in(&self, pos: usize, end: usize) -> Option<usize> {
        let id = self.open.partition_point(|&open| open < pos);
        (id < self.open.len() && self.open[id] < end).then_some(id)
    }
}
