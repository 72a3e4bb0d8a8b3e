//! Table attachment.
//!
//! Tables are detected in a separate pass over the page geometry, after
//! every text pass has finished, and then folded into the finished
//! trees. Attachment is append-only; the text tree is never reordered.

use crate::model::{Node, Page};

/// Append externally extracted tables to a page, in extraction order.
///
/// Each table goes to the most recently opened heading: the page's last
/// top-level node when it is a section or subsection, descending into
/// the section's trailing subsection when it has one. When the last
/// top-level node is not a heading the table lands at the page root,
/// even if a section sits earlier in the page. Only the trailing chain
/// is consulted; nothing searches backwards for an earlier heading.
pub fn attach_tables(page: &mut Page, tables: Vec<Vec<Vec<String>>>) {
    for rows in tables {
        let table = Node::table(rows);
        match target_children(&mut page.content) {
            Some(children) => children.push(table),
            None => page.content.push(table),
        }
    }
}

/// Child list of the attachment target, or `None` for the page root.
///
/// The descent is at most one level: a section hands off to its
/// trailing subsection, and subsections never nest further.
fn target_children(content: &mut [Node]) -> Option<&mut Vec<Node>> {
    match content.last_mut()? {
        Node::Section {
            content: children, ..
        } => {
            if matches!(children.last(), Some(Node::Subsection { .. })) {
                children.last_mut().and_then(Node::children_mut)
            } else {
                Some(children)
            }
        }
        Node::Subsection {
            content: children, ..
        } => Some(children),
        _ => None,
    }
}
