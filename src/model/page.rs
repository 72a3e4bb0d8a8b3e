//! Page-level types.

use super::Node;
use serde::{Deserialize, Serialize};

/// A single page and its structure tree.
///
/// The page root may hold sections, subsections, paragraphs, or tables
/// directly when no heading precedes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed)
    pub page_number: u32,

    /// Top-level nodes in reading order
    pub content: Vec<Node>,
}

impl Page {
    /// Create a new empty page.
    pub fn new(page_number: u32) -> Self {
        Self {
            page_number,
            content: Vec::new(),
        }
    }

    /// Append a node at the page root.
    pub fn push(&mut self, node: Node) {
        self.content.push(node);
    }

    /// Check if the page has no content.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Number of top-level nodes.
    pub fn node_count(&self) -> usize {
        self.content.len()
    }
}
