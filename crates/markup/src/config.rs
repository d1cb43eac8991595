//! Parser configuration

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Tags that expand to `input<type:TAG>` when written bare
pub const DEFAULT_INPUT_SHORTHANDS: &[&str] =
    &["checkbox", "radio", "text", "number", "password", "url"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Lower-case tag names rewritten to `input` with a matching `type`
    pub input_shorthands: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            input_shorthands: DEFAULT_INPUT_SHORTHANDS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl ParserConfig {
    /// Load from JSON; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// `folded_tag` must already be lower-cased
    pub fn is_input_shorthand(&self, folded_tag: &str) -> bool {
        self.input_shorthands.iter().any(|s| s == folded_tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_shorthands() {
        let config = ParserConfig::default();
        for tag in ["checkbox", "radio", "text", "number", "password", "url"] {
            assert!(config.is_input_shorthand(tag));
        }
        assert!(!config.is_input_shorthand("email"));
    }

    #[test]
    fn test_from_json() {
        let config = ParserConfig::from_json(r#"{"input_shorthands": ["email", "date"]}"#).unwrap();
        assert!(config.is_input_shorthand("date"));
        assert!(!config.is_input_shorthand("checkbox"));

        assert_eq!(ParserConfig::from_json("{}").unwrap(), ParserConfig::default());
        assert!(ParserConfig::from_json("{\"input_shorthands\": 3}").is_err());
    }
}
