//! Shared markdown parser
//!
//! Wraps pulldown-cmark behind the plugin-extensible parser configuration
//! and turns its event stream into the canonical tree. Fenced code blocks
//! are reclassified after parsing: a language tag of exactly `style` becomes
//! a style node, a tag containing `component` becomes a component node. The
//! style match wins; a tag is never both.

use pulldown_cmark::{Alignment, CodeBlockKind, Event, Options, Parser, Tag};

use crate::domain::DomainError;
use crate::domain::plugin::ParserExtension;
use crate::domain::tree::{CellAlignment, MarkdownNode};

/// The shared parser, configured once per plugin-set activation.
///
/// The base grammar is CommonMark plus footnotes; plugins contribute further
/// extensions in registration order.
#[derive(Debug, Clone)]
pub struct MarkdownSourceParser {
    options: Options,
}

impl Default for MarkdownSourceParser {
    fn default() -> Self {
        Self::with_extensions(&[])
    }
}

impl MarkdownSourceParser {
    /// Creates a parser with the base grammar plus the given extensions
    pub fn with_extensions(extensions: &[ParserExtension]) -> Self {
        let mut options = Options::ENABLE_FOOTNOTES;

        for extension in extensions {
            options.insert(match extension {
                ParserExtension::Tables => Options::ENABLE_TABLES,
                ParserExtension::Strikethrough => Options::ENABLE_STRIKETHROUGH,
                ParserExtension::TaskLists => Options::ENABLE_TASKLISTS,
                ParserExtension::SmartPunctuation => Options::ENABLE_SMART_PUNCTUATION,
                ParserExtension::HeadingAttributes => Options::ENABLE_HEADING_ATTRIBUTES,
            });
        }

        Self { options }
    }

    /// Parses fixed-up content into a raw canonical tree
    pub fn parse(&self, content: &str) -> Result<MarkdownNode, DomainError> {
        let mut stack: Vec<MarkdownNode> = vec![MarkdownNode::root()];

        for event in Parser::new_ext(content, self.options) {
            match event {
                Event::Start(tag) => stack.push(Self::container_for(tag)),
                Event::End(_) => {
                    let node = stack
                        .pop()
                        .ok_or_else(|| DomainError::parse("unbalanced container end"))?;
                    Self::attach(&mut stack, node)?;
                }
                Event::Text(text) => Self::append_text(&mut stack, &text)?,
                Event::Code(code) => Self::attach(
                    &mut stack,
                    MarkdownNode::InlineCode {
                        value: code.into_string(),
                    },
                )?,
                Event::Html(html) => Self::append_html(&mut stack, &html)?,
                Event::FootnoteReference(label) => Self::attach(
                    &mut stack,
                    MarkdownNode::FootnoteReference {
                        label: label.into_string(),
                    },
                )?,
                Event::SoftBreak => Self::attach(&mut stack, MarkdownNode::SoftBreak)?,
                Event::HardBreak => Self::attach(&mut stack, MarkdownNode::HardBreak)?,
                Event::Rule => Self::attach(&mut stack, MarkdownNode::Rule)?,
                Event::TaskListMarker(checked) => {
                    if let Some(MarkdownNode::Item {
                        checked: item_checked,
                        ..
                    }) = stack.last_mut()
                    {
                        *item_checked = Some(checked);
                    }
                }
            }
        }

        if stack.len() != 1 {
            return Err(DomainError::parse("unclosed container at end of input"));
        }

        // The root was pushed first, so this pop cannot fail
        stack
            .pop()
            .ok_or_else(|| DomainError::parse("missing root container"))
    }

    fn container_for(tag: Tag<'_>) -> MarkdownNode {
        match tag {
            Tag::Paragraph => MarkdownNode::Paragraph {
                children: Vec::new(),
            },
            Tag::Heading(level, _, _) => MarkdownNode::Heading {
                depth: level as u8,
                children: Vec::new(),
            },
            Tag::BlockQuote => MarkdownNode::BlockQuote {
                children: Vec::new(),
            },
            Tag::CodeBlock(kind) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(info) => {
                        info.split_whitespace().next().map(str::to_string)
                    }
                    CodeBlockKind::Indented => None,
                };

                MarkdownNode::Code {
                    lang,
                    value: String::new(),
                }
            }
            Tag::List(start) => MarkdownNode::List {
                ordered: start.is_some(),
                start,
                children: Vec::new(),
            },
            Tag::Item => MarkdownNode::Item {
                checked: None,
                children: Vec::new(),
            },
            Tag::FootnoteDefinition(label) => MarkdownNode::FootnoteDefinition {
                label: label.into_string(),
                children: Vec::new(),
            },
            Tag::Table(alignments) => MarkdownNode::Table {
                alignments: alignments.iter().map(Self::alignment_for).collect(),
                children: Vec::new(),
            },
            Tag::TableHead => MarkdownNode::TableHead {
                children: Vec::new(),
            },
            Tag::TableRow => MarkdownNode::TableRow {
                children: Vec::new(),
            },
            Tag::TableCell => MarkdownNode::TableCell {
                children: Vec::new(),
            },
            Tag::Emphasis => MarkdownNode::Emphasis {
                children: Vec::new(),
            },
            Tag::Strong => MarkdownNode::Strong {
                children: Vec::new(),
            },
            Tag::Strikethrough => MarkdownNode::Strikethrough {
                children: Vec::new(),
            },
            Tag::Link(_, url, title) => MarkdownNode::Link {
                url: url.into_string(),
                title: Some(title.into_string()).filter(|t| !t.is_empty()),
                children: Vec::new(),
            },
            Tag::Image(_, url, title) => MarkdownNode::Image {
                url: url.into_string(),
                title: Some(title.into_string()).filter(|t| !t.is_empty()),
                children: Vec::new(),
            },
        }
    }

    fn alignment_for(alignment: &Alignment) -> CellAlignment {
        match alignment {
            Alignment::None => CellAlignment::None,
            Alignment::Left => CellAlignment::Left,
            Alignment::Center => CellAlignment::Center,
            Alignment::Right => CellAlignment::Right,
        }
    }

    fn attach(stack: &mut Vec<MarkdownNode>, node: MarkdownNode) -> Result<(), DomainError> {
        let parent = stack
            .last_mut()
            .ok_or_else(|| DomainError::parse("node outside of any container"))?;

        parent
            .children_mut()
            .ok_or_else(|| DomainError::parse("parent cannot hold children"))?
            .push(node);

        Ok(())
    }

    fn append_text(stack: &mut Vec<MarkdownNode>, text: &str) -> Result<(), DomainError> {
        // Code block bodies arrive as plain text events
        if let Some(MarkdownNode::Code { value, .. }) = stack.last_mut() {
            value.push_str(text);
            return Ok(());
        }

        // Merge adjacent runs so one logical run is one text node
        if let Some(parent) = stack.last_mut() {
            if let Some(children) = parent.children_mut() {
                if let Some(MarkdownNode::Text { value }) = children.last_mut() {
                    value.push_str(text);
                    return Ok(());
                }
            }
        }

        Self::attach(stack, MarkdownNode::text(text))
    }

    fn append_html(stack: &mut Vec<MarkdownNode>, html: &str) -> Result<(), DomainError> {
        // Block-level HTML arrives line by line; keep it as one node
        if let Some(parent) = stack.last_mut() {
            if let Some(children) = parent.children_mut() {
                if let Some(MarkdownNode::Html { value }) = children.last_mut() {
                    value.push_str(html);
                    return Ok(());
                }
            }
        }

        Self::attach(
            stack,
            MarkdownNode::Html {
                value: html.to_string(),
            },
        )
    }
}

/// Reclassifies fenced code blocks into style and component nodes.
///
/// Runs between parsing and the tree-transform phase; first match wins, so
/// a `style` tag never also matches `component`.
pub(crate) fn reclassify_code_blocks(tree: &mut MarkdownNode) {
    tree.visit_mut(&mut |node| {
        if let MarkdownNode::Code {
            lang: Some(lang),
            value,
        } = node
        {
            if lang == "style" {
                *node = MarkdownNode::Style {
                    value: std::mem::take(value),
                };
            } else if lang.contains("component") {
                *node = MarkdownNode::Component {
                    lang: std::mem::take(lang),
                    value: std::mem::take(value),
                };
            }
        }
    });
}
