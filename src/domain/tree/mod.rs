//! Tree domain - The canonical parsed representation of a document

mod node;

pub use node::{CellAlignment, MarkdownNode};
