//! Output model for converted factsheets.
//!
//! The model is the bridge between structure inference and JSON
//! rendering: a document of pages, each page a tree of [`Node`] values
//! (sections, subsections, paragraphs, tables).

mod document;
mod node;
mod page;

pub use document::{Document, Metadata};
pub use node::Node;
pub use page::Page;
