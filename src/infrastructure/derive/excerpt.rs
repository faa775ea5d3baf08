//! Excerpt derivation

use crate::domain::tree::MarkdownNode;

/// Default maximum excerpt length, in characters
pub const DEFAULT_EXCERPT_LENGTH: usize = 140;

/// Marker appended to truncated excerpts
pub const ELLIPSIS: &str = "…";

/// Joins every plain-text and inline-code value in document order.
///
/// This untruncated join is the cached artifact; truncation length is a
/// request parameter, never a cache dimension.
pub fn excerpt_source(tree: &MarkdownNode) -> String {
    let mut parts = Vec::new();

    tree.visit(&mut |node| match node {
        MarkdownNode::Text { value } | MarkdownNode::InlineCode { value } => {
            parts.push(value.as_str());
        }
        _ => {}
    });

    parts.join(" ")
}

/// Truncates text to at most `max_length` characters at a word boundary,
/// appending the ellipsis marker when anything was cut.
pub fn prune(text: &str, max_length: usize) -> String {
    let chars: Vec<char> = text.chars().collect();

    if chars.len() <= max_length {
        return text.to_string();
    }

    let mut cut: String = chars[..max_length].iter().collect();

    // Cut mid-word: back off to the last whitespace inside the window
    if !chars[max_length].is_whitespace() {
        if let Some(boundary) = cut.rfind(char::is_whitespace) {
            cut.truncate(boundary);
        }
    }

    let mut pruned = cut.trim_end().to_string();
    pruned.push_str(ELLIPSIS);
    pruned
}
