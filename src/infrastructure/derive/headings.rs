//! Heading extraction

use crate::domain::artifact::Heading;
use crate::domain::tree::MarkdownNode;

/// Collects headings from the frozen tree in document order.
///
/// A heading's display value is its first descendant text run; a heading
/// wrapped entirely in emphasis or links yields only that first plain run.
pub fn collect_headings(tree: &MarkdownNode) -> Vec<Heading> {
    let mut headings = Vec::new();

    tree.visit(&mut |node| {
        if let MarkdownNode::Heading { depth, .. } = node {
            headings.push(Heading::new(node.first_text().map(str::to_string), *depth));
        }
    });

    headings
}

/// Depth filter, applied after cache retrieval (never part of the key)
pub fn filter_by_depth(headings: Vec<Heading>, depth: u8) -> Vec<Heading> {
    headings.into_iter().filter(|h| h.depth == depth).collect()
}
