//! Compact markup for element trees
//!
//! One string describes a whole tree:
//!
//! ```text
//! div.card<id:'x'> { h1(Title) button.btn<onclick:'go()'>#okbtn }
//! ```
//!
//! | syntax | meaning |
//! |---|---|
//! | `{ }` | children of the element declared right before |
//! | whitespace | separates sibling declarations |
//! | `tag.c1.c2` | tag name and classes |
//! | `<k:v,k2:'a,b'>` | attributes; quote values to embed punctuation |
//! | `(html)` | literal inner HTML |
//! | `#key` | register the element under a lookup key |
//! | `checkbox` `radio` `text` `number` `password` `url` | `input<type:...>` |
//!
//! Parsing is two passes: a quote-aware brace match over the whole string,
//! then a recursive build that feeds each brace-free header to a small
//! state machine. Only unbalanced braces are errors.

pub mod attributes;
pub mod braces;
mod builder;
pub mod config;
pub mod cursor;
pub mod error;
pub mod parser;
pub mod segment;

pub use braces::BraceTable;
pub use config::ParserConfig;
pub use error::{BraceFault, MarkupError, Result};
pub use parser::{check, parse, DocumentExt, Parser};
