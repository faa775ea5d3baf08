//! Canonical tree to HTML rendering
//!
//! Dangerous raw-markup passthrough is deliberate: raw HTML embedded in the
//! source and reclassified component payloads are emitted verbatim, never
//! escaped. Everything else goes through entity escaping.

use crate::domain::tree::MarkdownNode;

/// Renders a frozen canonical tree to an HTML string
#[derive(Debug, Clone, Default)]
pub struct HtmlRenderer;

impl HtmlRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Renders the node and its descendants
    pub fn render(&self, node: &MarkdownNode) -> String {
        let mut out = String::new();
        self.render_node(node, &mut out, false);
        out
    }

    fn render_children(&self, children: &[MarkdownNode], out: &mut String, in_table_head: bool) {
        for child in children {
            self.render_node(child, out, in_table_head);
        }
    }

    fn render_node(&self, node: &MarkdownNode, out: &mut String, in_table_head: bool) {
        match node {
            MarkdownNode::Root { children } => self.render_children(children, out, in_table_head),
            MarkdownNode::Heading { depth, children } => {
                let depth = (*depth).clamp(1, 6);
                out.push_str(&format!("<h{}>", depth));
                self.render_children(children, out, in_table_head);
                out.push_str(&format!("</h{}>\n", depth));
            }
            MarkdownNode::Paragraph { children } => {
                out.push_str("<p>");
                self.render_children(children, out, in_table_head);
                out.push_str("</p>\n");
            }
            MarkdownNode::BlockQuote { children } => {
                out.push_str("<blockquote>\n");
                self.render_children(children, out, in_table_head);
                out.push_str("</blockquote>\n");
            }
            MarkdownNode::List {
                ordered,
                start,
                children,
            } => {
                if *ordered {
                    match start {
                        Some(start) if *start != 1 => {
                            out.push_str(&format!("<ol start=\"{}\">\n", start))
                        }
                        _ => out.push_str("<ol>\n"),
                    }
                    self.render_children(children, out, in_table_head);
                    out.push_str("</ol>\n");
                } else {
                    out.push_str("<ul>\n");
                    self.render_children(children, out, in_table_head);
                    out.push_str("</ul>\n");
                }
            }
            MarkdownNode::Item { checked, children } => {
                out.push_str("<li>");
                if let Some(checked) = checked {
                    if *checked {
                        out.push_str("<input type=\"checkbox\" checked disabled />");
                    } else {
                        out.push_str("<input type=\"checkbox\" disabled />");
                    }
                }
                self.render_children(children, out, in_table_head);
                out.push_str("</li>\n");
            }
            MarkdownNode::Code { lang, value } => {
                match lang {
                    Some(lang) => {
                        out.push_str("<pre><code class=\"language-");
                        push_escaped(out, lang);
                        out.push_str("\">");
                    }
                    None => out.push_str("<pre><code>"),
                }
                push_escaped(out, value);
                out.push_str("</code></pre>\n");
            }
            MarkdownNode::Style { value } => {
                // Style payloads are CSS, not text content
                out.push_str("<style>\n");
                out.push_str(value);
                out.push_str("</style>\n");
            }
            MarkdownNode::Component { value, .. } => {
                // Component payloads are consumer-side markup, passed through
                out.push_str(value);
            }
            MarkdownNode::InlineCode { value } => {
                out.push_str("<code>");
                push_escaped(out, value);
                out.push_str("</code>");
            }
            MarkdownNode::Text { value } => push_escaped(out, value),
            MarkdownNode::Emphasis { children } => {
                out.push_str("<em>");
                self.render_children(children, out, in_table_head);
                out.push_str("</em>");
            }
            MarkdownNode::Strong { children } => {
                out.push_str("<strong>");
                self.render_children(children, out, in_table_head);
                out.push_str("</strong>");
            }
            MarkdownNode::Strikethrough { children } => {
                out.push_str("<del>");
                self.render_children(children, out, in_table_head);
                out.push_str("</del>");
            }
            MarkdownNode::Link {
                url,
                title,
                children,
            } => {
                out.push_str("<a href=\"");
                push_escaped(out, url);
                if let Some(title) = title {
                    out.push_str("\" title=\"");
                    push_escaped(out, title);
                }
                out.push_str("\">");
                self.render_children(children, out, in_table_head);
                out.push_str("</a>");
            }
            MarkdownNode::Image {
                url,
                title,
                children,
            } => {
                out.push_str("<img src=\"");
                push_escaped(out, url);
                out.push_str("\" alt=\"");
                push_escaped(out, &plain_text_of(children));
                if let Some(title) = title {
                    out.push_str("\" title=\"");
                    push_escaped(out, title);
                }
                out.push_str("\" />");
            }
            MarkdownNode::Html { value } => out.push_str(value),
            MarkdownNode::FootnoteReference { label } => {
                out.push_str("<sup class=\"footnote-reference\"><a href=\"#");
                push_escaped(out, label);
                out.push_str("\">");
                push_escaped(out, label);
                out.push_str("</a></sup>");
            }
            MarkdownNode::FootnoteDefinition { label, children } => {
                out.push_str("<div class=\"footnote-definition\" id=\"");
                push_escaped(out, label);
                out.push_str("\"><sup class=\"footnote-definition-label\">");
                push_escaped(out, label);
                out.push_str("</sup>");
                self.render_children(children, out, in_table_head);
                out.push_str("</div>\n");
            }
            MarkdownNode::Table { children, .. } => {
                out.push_str("<table>\n");
                self.render_children(children, out, in_table_head);
                out.push_str("</table>\n");
            }
            MarkdownNode::TableHead { children } => {
                out.push_str("<thead><tr>");
                self.render_children(children, out, true);
                out.push_str("</tr></thead>\n");
            }
            MarkdownNode::TableRow { children } => {
                out.push_str("<tr>");
                self.render_children(children, out, in_table_head);
                out.push_str("</tr>\n");
            }
            MarkdownNode::TableCell { children } => {
                let tag = if in_table_head { "th" } else { "td" };
                out.push_str(&format!("<{}>", tag));
                self.render_children(children, out, in_table_head);
                out.push_str(&format!("</{}>", tag));
            }
            MarkdownNode::SoftBreak => out.push('\n'),
            MarkdownNode::HardBreak => out.push_str("<br />\n"),
            MarkdownNode::Rule => out.push_str("<hr />\n"),
        }
    }
}

/// Concatenated text content of a subtree, used for image alt text
fn plain_text_of(children: &[MarkdownNode]) -> String {
    let mut parts = Vec::new();

    for child in children {
        child.visit(&mut |node| {
            if let MarkdownNode::Text { value } = node {
                parts.push(value.as_str());
            }
        });
    }

    parts.concat()
}

fn push_escaped(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tree::CellAlignment;

    fn render(node: &MarkdownNode) -> String {
        HtmlRenderer::new().render(node)
    }

    #[test]
    fn test_render_heading_and_paragraph() {
        let tree = MarkdownNode::Root {
            children: vec![
                MarkdownNode::Heading {
                    depth: 2,
                    children: vec![MarkdownNode::text("Title")],
                },
                MarkdownNode::Paragraph {
                    children: vec![MarkdownNode::text("Body")],
                },
            ],
        };

        assert_eq!(render(&tree), "<h2>Title</h2>\n<p>Body</p>\n");
    }

    #[test]
    fn test_render_escapes_text() {
        let node = MarkdownNode::Paragraph {
            children: vec![MarkdownNode::text("a < b & c")],
        };

        assert_eq!(render(&node), "<p>a &lt; b &amp; c</p>\n");
    }

    #[test]
    fn test_render_raw_html_verbatim() {
        let node = MarkdownNode::Root {
            children: vec![MarkdownNode::Html {
                value: "<marquee>hi</marquee>\n".to_string(),
            }],
        };

        assert_eq!(render(&node), "<marquee>hi</marquee>\n");
    }

    #[test]
    fn test_render_style_node() {
        let node = MarkdownNode::Style {
            value: "body { color: red; }\n".to_string(),
        };

        assert_eq!(render(&node), "<style>\nbody { color: red; }\n</style>\n");
    }

    #[test]
    fn test_render_component_passthrough() {
        let node = MarkdownNode::Component {
            lang: "jsx-component".to_string(),
            value: "<Counter initial={1} />\n".to_string(),
        };

        assert_eq!(render(&node), "<Counter initial={1} />\n");
    }

    #[test]
    fn test_render_code_block_with_language() {
        let node = MarkdownNode::Code {
            lang: Some("rust".to_string()),
            value: "let x = 1;\n".to_string(),
        };

        assert_eq!(
            render(&node),
            "<pre><code class=\"language-rust\">let x = 1;\n</code></pre>\n"
        );
    }

    #[test]
    fn test_render_link_with_title() {
        let node = MarkdownNode::Link {
            url: "https://example.com".to_string(),
            title: Some("Example".to_string()),
            children: vec![MarkdownNode::text("go")],
        };

        assert_eq!(
            render(&node),
            "<a href=\"https://example.com\" title=\"Example\">go</a>"
        );
    }

    #[test]
    fn test_render_table_head_and_body_cells() {
        let table = MarkdownNode::Table {
            alignments: vec![CellAlignment::None],
            children: vec![
                MarkdownNode::TableHead {
                    children: vec![MarkdownNode::TableCell {
                        children: vec![MarkdownNode::text("h")],
                    }],
                },
                MarkdownNode::TableRow {
                    children: vec![MarkdownNode::TableCell {
                        children: vec![MarkdownNode::text("d")],
                    }],
                },
            ],
        };

        let html = render(&table);
        assert!(html.contains("<th>h</th>"));
        assert!(html.contains("<td>d</td>"));
    }

    #[test]
    fn test_render_nested_list() {
        let list = MarkdownNode::List {
            ordered: true,
            start: Some(3),
            children: vec![MarkdownNode::Item {
                checked: None,
                children: vec![MarkdownNode::text("third")],
            }],
        };

        assert_eq!(render(&list), "<ol start=\"3\">\n<li>third</li>\n</ol>\n");
    }
}
