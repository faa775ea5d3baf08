//! Rendered-output stripping
//!
//! Reduces rendered HTML back to plain text for the reading-time estimate.

use scraper::Html;

/// Strips all markup from rendered HTML, returning the text content.
///
/// Tag boundaries become single spaces so adjacent elements do not fuse
/// into one token.
pub fn html_to_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);

    let parts: Vec<&str> = fragment
        .root_element()
        .text()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();

    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_simple_markup() {
        let text = html_to_text("<h1>Title</h1>\n<p>Body <em>text</em> here.</p>\n");
        assert_eq!(text, "Title Body text here.");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(html_to_text(""), "");
    }

    #[test]
    fn test_keeps_text_of_unknown_elements() {
        let text = html_to_text("<custom-note>inside</custom-note> after");
        assert!(text.contains("inside"));
        assert!(text.contains("after"));
    }

    #[test]
    fn test_whitespace_only_nodes_dropped() {
        let text = html_to_text("<ul>\n<li>one</li>\n<li>two</li>\n</ul>\n");
        assert_eq!(text, "one two");
    }
}
