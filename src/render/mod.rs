//! Rendering module for converting documents to JSON output.

mod json;
mod options;

pub use json::{to_json, JsonFormat};
pub use options::PageSelection;
