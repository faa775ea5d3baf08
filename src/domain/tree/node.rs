//! Canonical tree node model
//!
//! The canonical tree is the single parsed-and-transformed representation of
//! a document, shared by every artifact deriver. It is a tagged-variant sum
//! type so that visitors match exhaustively and adding a node kind is a
//! compile-time-checked change. The tree is serde round-trippable because it
//! is itself a cached artifact.

use serde::{Deserialize, Serialize};

/// Column alignment of a table cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellAlignment {
    None,
    Left,
    Center,
    Right,
}

/// A node of the canonical tree.
///
/// Fenced code blocks whose language tag is exactly `style` are reclassified
/// to [`MarkdownNode::Style`], and those whose tag contains `component` to
/// [`MarkdownNode::Component`]; the style match wins, a tag is never both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum MarkdownNode {
    Root {
        children: Vec<MarkdownNode>,
    },
    Heading {
        depth: u8,
        children: Vec<MarkdownNode>,
    },
    Paragraph {
        children: Vec<MarkdownNode>,
    },
    BlockQuote {
        children: Vec<MarkdownNode>,
    },
    List {
        ordered: bool,
        start: Option<u64>,
        children: Vec<MarkdownNode>,
    },
    Item {
        checked: Option<bool>,
        children: Vec<MarkdownNode>,
    },
    Code {
        lang: Option<String>,
        value: String,
    },
    Style {
        value: String,
    },
    Component {
        lang: String,
        value: String,
    },
    InlineCode {
        value: String,
    },
    Text {
        value: String,
    },
    Emphasis {
        children: Vec<MarkdownNode>,
    },
    Strong {
        children: Vec<MarkdownNode>,
    },
    Strikethrough {
        children: Vec<MarkdownNode>,
    },
    Link {
        url: String,
        title: Option<String>,
        children: Vec<MarkdownNode>,
    },
    Image {
        url: String,
        title: Option<String>,
        children: Vec<MarkdownNode>,
    },
    Html {
        value: String,
    },
    FootnoteReference {
        label: String,
    },
    FootnoteDefinition {
        label: String,
        children: Vec<MarkdownNode>,
    },
    Table {
        alignments: Vec<CellAlignment>,
        children: Vec<MarkdownNode>,
    },
    TableHead {
        children: Vec<MarkdownNode>,
    },
    TableRow {
        children: Vec<MarkdownNode>,
    },
    TableCell {
        children: Vec<MarkdownNode>,
    },
    SoftBreak,
    HardBreak,
    Rule,
}

impl MarkdownNode {
    /// Creates an empty root node
    pub fn root() -> Self {
        Self::Root {
            children: Vec::new(),
        }
    }

    /// Creates a text node
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text {
            value: value.into(),
        }
    }

    /// Child nodes, when this kind is a container
    pub fn children(&self) -> Option<&[MarkdownNode]> {
        match self {
            Self::Root { children }
            | Self::Heading { children, .. }
            | Self::Paragraph { children }
            | Self::BlockQuote { children }
            | Self::List { children, .. }
            | Self::Item { children, .. }
            | Self::Emphasis { children }
            | Self::Strong { children }
            | Self::Strikethrough { children }
            | Self::Link { children, .. }
            | Self::Image { children, .. }
            | Self::FootnoteDefinition { children, .. }
            | Self::Table { children, .. }
            | Self::TableHead { children }
            | Self::TableRow { children }
            | Self::TableCell { children } => Some(children),
            Self::Code { .. }
            | Self::Style { .. }
            | Self::Component { .. }
            | Self::InlineCode { .. }
            | Self::Text { .. }
            | Self::Html { .. }
            | Self::FootnoteReference { .. }
            | Self::SoftBreak
            | Self::HardBreak
            | Self::Rule => None,
        }
    }

    /// Mutable child nodes, when this kind is a container
    pub fn children_mut(&mut self) -> Option<&mut Vec<MarkdownNode>> {
        match self {
            Self::Root { children }
            | Self::Heading { children, .. }
            | Self::Paragraph { children }
            | Self::BlockQuote { children }
            | Self::List { children, .. }
            | Self::Item { children, .. }
            | Self::Emphasis { children }
            | Self::Strong { children }
            | Self::Strikethrough { children }
            | Self::Link { children, .. }
            | Self::Image { children, .. }
            | Self::FootnoteDefinition { children, .. }
            | Self::Table { children, .. }
            | Self::TableHead { children }
            | Self::TableRow { children }
            | Self::TableCell { children } => Some(children),
            Self::Code { .. }
            | Self::Style { .. }
            | Self::Component { .. }
            | Self::InlineCode { .. }
            | Self::Text { .. }
            | Self::Html { .. }
            | Self::FootnoteReference { .. }
            | Self::SoftBreak
            | Self::HardBreak
            | Self::Rule => None,
        }
    }

    /// Depth-first preorder traversal
    pub fn visit<'a, F>(&'a self, f: &mut F)
    where
        F: FnMut(&'a MarkdownNode),
    {
        f(self);

        if let Some(children) = self.children() {
            for child in children {
                child.visit(f);
            }
        }
    }

    /// Depth-first preorder traversal with mutable access.
    ///
    /// Only valid before the tree is frozen, i.e. during the tree-transform
    /// phase and the code-block reclassification that precedes it.
    pub fn visit_mut<F>(&mut self, f: &mut F)
    where
        F: FnMut(&mut MarkdownNode),
    {
        f(self);

        if let Some(children) = self.children_mut() {
            for child in children {
                child.visit_mut(f);
            }
        }
    }

    /// First descendant text value, in document order
    pub fn first_text(&self) -> Option<&str> {
        let mut found = None;

        self.visit(&mut |node| {
            if found.is_none() {
                if let MarkdownNode::Text { value } = node {
                    found = Some(value.as_str());
                }
            }
        });

        found
    }
}
