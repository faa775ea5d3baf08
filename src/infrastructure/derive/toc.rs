//! Table-of-contents outline construction
//!
//! Builds a nested list over the document's headings with github-style slug
//! anchors. The outline is itself a canonical-tree fragment, so it renders
//! through the same HTML pipeline as the document body.

use std::collections::HashMap;

use crate::domain::tree::MarkdownNode;

use super::headings::collect_headings;

struct TocEntry {
    text: String,
    slug: String,
    depth: u8,
}

/// Builds the table-of-contents outline for a tree.
///
/// Returns `None` when the document has no usable headings; the caller maps
/// that to the documented empty-string artifact.
pub fn table_of_contents(tree: &MarkdownNode) -> Option<MarkdownNode> {
    let mut slugger = Slugger::default();

    let entries: Vec<TocEntry> = collect_headings(tree)
        .into_iter()
        .filter_map(|heading| {
            let text = heading.value?;
            let slug = slugger.slug(&text);
            Some(TocEntry {
                text,
                slug,
                depth: heading.depth,
            })
        })
        .collect();

    if entries.is_empty() {
        return None;
    }

    let root_depth = entries.iter().map(|e| e.depth).min().unwrap_or(1);
    let mut pos = 0;
    let items = build_items(&entries, &mut pos, root_depth);

    Some(list_node(items))
}

fn build_items(entries: &[TocEntry], pos: &mut usize, depth: u8) -> Vec<MarkdownNode> {
    let mut items = Vec::new();

    while *pos < entries.len() {
        let entry = &entries[*pos];

        if entry.depth < depth {
            break;
        }

        if entry.depth == depth {
            *pos += 1;
            let mut children = vec![link_node(entry)];

            if *pos < entries.len() && entries[*pos].depth > depth {
                let nested_depth = entries[*pos].depth;
                children.push(list_node(build_items(entries, pos, nested_depth)));
            }

            items.push(MarkdownNode::Item {
                checked: None,
                children,
            });
        } else {
            // A deeper heading with no parent at this level gets a bare item
            let nested_depth = entry.depth;
            let nested = build_items(entries, pos, nested_depth);
            items.push(MarkdownNode::Item {
                checked: None,
                children: vec![list_node(nested)],
            });
        }
    }

    items
}

fn list_node(items: Vec<MarkdownNode>) -> MarkdownNode {
    MarkdownNode::List {
        ordered: false,
        start: None,
        children: items,
    }
}

fn link_node(entry: &TocEntry) -> MarkdownNode {
    MarkdownNode::Link {
        url: format!("#{}", entry.slug),
        title: None,
        children: vec![MarkdownNode::text(entry.text.clone())],
    }
}

/// Github-style anchor slugs with duplicate counters
#[derive(Default)]
struct Slugger {
    seen: HashMap<String, usize>,
}

impl Slugger {
    fn slug(&mut self, text: &str) -> String {
        let base: String = text
            .to_lowercase()
            .chars()
            .filter_map(|ch| {
                if ch.is_alphanumeric() {
                    Some(ch)
                } else if ch.is_whitespace() || ch == '-' {
                    Some('-')
                } else {
                    None
                }
            })
            .collect();

        let count = self.seen.entry(base.clone()).or_insert(0);
        let slug = if *count == 0 {
            base.clone()
        } else {
            format!("{}-{}", base, count)
        };
        *count += 1;

        slug
    }
}
