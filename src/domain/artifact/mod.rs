//! Artifact domain - Derived value types exposed by the artifact API

use serde::{Deserialize, Serialize};

/// A heading extracted from the canonical tree.
///
/// The value is the heading's *first* descendant text run only; a heading
/// whose content starts with emphasis or a link yields that first plain run,
/// not the full rendered label, and a heading with no text run at all has no
/// value. Known limitation, kept on purpose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    pub value: Option<String>,
    /// Nesting depth, 1 through 6
    pub depth: u8,
}

impl Heading {
    pub fn new(value: Option<String>, depth: u8) -> Self {
        Self { value, depth }
    }
}

/// Word statistics over the raw document content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    pub words: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_serde_round_trip() {
        let heading = Heading::new(Some("Intro".to_string()), 2);

        let json = serde_json::to_string(&heading).unwrap();
        let back: Heading = serde_json::from_str(&json).unwrap();

        assert_eq!(heading, back);
    }

    #[test]
    fn test_word_count_serde_shape() {
        let count = WordCount { words: 42 };
        let json = serde_json::to_string(&count).unwrap();
        assert_eq!(json, r#"{"words":42}"#);
    }
}
