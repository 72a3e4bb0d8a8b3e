//! Structure tree nodes.

use serde::{Deserialize, Serialize};

/// A node in a page's structure tree.
///
/// Serializes with a `"type"` tag so consumers can dispatch on node kind:
/// `{"type": "section", "title": "...", "content": [...]}` and so on.
/// The table grid serializes under the `"text"` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    /// Accumulated prose between headings.
    Paragraph {
        /// Paragraph text, space-joined from the source fragments
        text: String,
    },

    /// A top-level heading and everything under it.
    Section {
        /// Heading text
        title: String,
        /// Child nodes in reading order
        content: Vec<Node>,
    },

    /// A heading nested under a section, or directly under the page root
    /// when no section is open.
    Subsection {
        /// Heading text
        title: String,
        /// Child nodes in reading order
        content: Vec<Node>,
    },

    /// A detected table as a raw grid of cell strings.
    Table {
        /// Row-major cell grid; cells may be empty strings
        #[serde(rename = "text")]
        rows: Vec<Vec<String>>,
    },
}

impl Node {
    /// Create a paragraph node.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Node::Paragraph { text: text.into() }
    }

    /// Create an empty section node.
    pub fn section(title: impl Into<String>) -> Self {
        Node::Section {
            title: title.into(),
            content: Vec::new(),
        }
    }

    /// Create an empty subsection node.
    pub fn subsection(title: impl Into<String>) -> Self {
        Node::Subsection {
            title: title.into(),
            content: Vec::new(),
        }
    }

    /// Create a table node from a cell grid.
    pub fn table(rows: Vec<Vec<String>>) -> Self {
        Node::Table { rows }
    }

    /// Heading title, if this node is a section or subsection.
    pub fn title(&self) -> Option<&str> {
        match self {
            Node::Section { title, .. } | Node::Subsection { title, .. } => Some(title),
            _ => None,
        }
    }

    /// Child nodes, if this node can have children.
    pub fn children(&self) -> Option<&[Node]> {
        match self {
            Node::Section { content, .. } | Node::Subsection { content, .. } => Some(content),
            _ => None,
        }
    }

    /// Mutable child list. `Some` only for sections and subsections;
    /// paragraphs and tables are leaves.
    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Section { content, .. } | Node::Subsection { content, .. } => Some(content),
            _ => None,
        }
    }

    /// Check if this node is a heading (section or subsection).
    pub fn is_heading(&self) -> bool {
        matches!(self, Node::Section { .. } | Node::Subsection { .. })
    }

    /// Check if this node is a paragraph.
    pub fn is_paragraph(&self) -> bool {
        matches!(self, Node::Paragraph { .. })
    }

    /// Check if this node is a table.
    pub fn is_table(&self) -> bool {
        matches!(self, Node::Table { .. })
    }
}
