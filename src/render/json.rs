//! JSON rendering for structured factsheet documents.
//!
//! The artifact is a top-level array of page objects. Document metadata is
//! informational and never serialized.

use crate::error::{Error, Result};
use crate::model::Document;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a document's page trees to JSON.
///
/// Non-ASCII text is emitted as-is; serde_json never escapes it.
pub fn to_json(doc: &Document, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(&doc.pages),
        JsonFormat::Compact => serde_json::to_string(&doc.pages),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}
