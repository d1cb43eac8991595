//! Attribute block parsing: the text between `<` and `>`
//!
//! `key:value,key:'value, with punctuation'`. The first unquoted `:` of a
//! pair splits key from value; an unquoted `,` after it ends the pair.

use crate::cursor::QuoteCursor;
use dom::Attributes;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Key,
    Value,
}

/// Strip one layer of matching quotes: `'x'` and `"x"` lose them, a lone
/// or mismatched quote is kept as literal text.
pub fn unquote(s: &str) -> &str {
    let bytes = s.as_bytes();
    match (bytes.first(), bytes.last()) {
        (Some(&first), Some(&last))
            if bytes.len() >= 2 && first == last && (first == b'\'' || first == b'"') =>
        {
            &s[1..s.len() - 1]
        }
        _ => s,
    }
}

pub fn parse_attributes(block: &str) -> Attributes {
    let mut cursor = QuoteCursor::new();
    let mut attributes = Attributes::default();
    let mut key = String::new();
    let mut value = String::new();
    let mut slot = Slot::Key;

    for c in block.chars() {
        let literal = cursor.feed(c);
        match (slot, c) {
            (Slot::Key, ':') if !literal => slot = Slot::Value,
            (Slot::Value, ',') if !literal => {
                commit(&mut attributes, &key, &value);
                key.clear();
                value.clear();
                slot = Slot::Key;
            }
            (Slot::Key, _) => key.push(c),
            (Slot::Value, _) => value.push(c),
        }
    }
    commit(&mut attributes, &key, &value);

    attributes
}

fn commit(attributes: &mut Attributes, key: &str, value: &str) {
    let key = unquote(key.trim());
    if key.is_empty() {
        return;
    }
    attributes.insert(key.to_string(), unquote(value.trim()).to_string());
}
