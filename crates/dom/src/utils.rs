//! Utility functions for tree processing

/// Cap text length to keep outlines readable
pub fn cap_text_length(text: &str, max_len: usize) -> String {
    if text.len() <= max_len {
        return text.to_string();
    }
    let mut end = max_len;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}

/// Split `name:value;name:value` into trimmed pairs.
///
/// Each clause is split on its first `:`; clauses without one, or with an
/// empty name, are skipped.
pub fn style_clauses(css: &str) -> impl Iterator<Item = (&str, &str)> {
    css.split(';').filter_map(|clause| {
        let (name, value) = clause.split_once(':')?;
        let name = name.trim();
        if name.is_empty() {
            None
        } else {
            Some((name, value.trim()))
        }
    })
}

/// Class tokens of a `.`-separated list, empties dropped
pub fn class_tokens(value: &str) -> impl Iterator<Item = &str> {
    value.split('.').map(str::trim).filter(|c| !c.is_empty())
}
