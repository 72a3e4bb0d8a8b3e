//! Document-level types.

use super::Page;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A converted factsheet document.
///
/// The persisted artifact is the page array alone (see
/// [`crate::render::to_json`]); metadata rides along for callers that
/// want it but is not part of the output file.
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// Pages in document order
    pub pages: Vec<Page>,

    /// Document metadata (title, author, dates, ...)
    pub metadata: Metadata,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of converted pages.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Get a converted page by its 1-indexed page number.
    pub fn get_page(&self, page_num: u32) -> Option<&Page> {
        self.pages.iter().find(|p| p.page_number == page_num)
    }

    /// Add a page to the document.
    pub fn add_page(&mut self, page: Page) {
        self.pages.push(page);
    }

    /// Check if the document has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Serialize the page array as indented JSON.
    pub fn to_json(&self) -> crate::error::Result<String> {
        crate::render::to_json(self, crate::render::JsonFormat::Pretty)
    }

    /// Serialize the page array as compact JSON.
    pub fn to_json_compact(&self) -> crate::error::Result<String> {
        crate::render::to_json(self, crate::render::JsonFormat::Compact)
    }
}

/// Document metadata from the trailer Info dictionary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title
    pub title: Option<String>,

    /// Document author
    pub author: Option<String>,

    /// Document subject
    pub subject: Option<String>,

    /// Keywords
    pub keywords: Option<String>,

    /// Creator application
    pub creator: Option<String>,

    /// PDF producer
    pub producer: Option<String>,

    /// Creation date
    pub created: Option<DateTime<Utc>>,

    /// Last modification date
    pub modified: Option<DateTime<Utc>>,

    /// PDF version (e.g., "1.7")
    pub pdf_version: String,

    /// Total number of pages in the source document
    pub page_count: u32,

    /// Whether the document is encrypted
    pub encrypted: bool,
}

impl Metadata {
    /// Create new metadata with PDF version.
    pub fn with_version(version: impl Into<String>) -> Self {
        Self {
            pdf_version: version.into(),
            ..Default::default()
        }
    }
}
