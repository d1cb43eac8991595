//! Quote tracking shared by every scan over markup text

/// Tracks whether the scan is inside a `'...'` or `"..."` run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct QuoteCursor {
    quote: Option<char>,
}

impl QuoteCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next character. Returns `true` when the character must be
    /// taken literally: it is a quote mark or lies between quote marks.
    pub fn feed(&mut self, c: char) -> bool {
        match self.quote {
            Some(open) => {
                if c == open {
                    self.quote = None;
                }
                true
            }
            None if c == '\'' || c == '"' => {
                self.quote = Some(c);
                true
            }
            None => false,
        }
    }
}
