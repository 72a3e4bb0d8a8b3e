//! Parsing options and configuration.

use crate::render::PageSelection;
use crate::structure::StructureOptions;

use super::tables::TableExtractorConfig;

/// Options for parsing factsheet documents.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// Page selection (which pages to parse)
    pub pages: PageSelection,

    /// Password for encrypted documents
    pub password: Option<String>,

    /// Whether to run table extraction and attachment
    pub extract_tables: bool,

    /// Structure inference thresholds
    pub structure: StructureOptions,

    /// Table extraction geometry
    pub tables: TableExtractorConfig,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (skip pages whose content cannot be extracted).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.pages = pages;
        self
    }

    /// Set password for encrypted documents.
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Skip table extraction, producing a text-only tree.
    pub fn text_only(mut self) -> Self {
        self.extract_tables = false;
        self
    }

    /// Set structure inference thresholds.
    pub fn with_structure(mut self, structure: StructureOptions) -> Self {
        self.structure = structure;
        self
    }

    /// Set table extraction geometry.
    pub fn with_tables(mut self, tables: TableExtractorConfig) -> Self {
        self.tables = tables;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Strict,
            pages: PageSelection::All,
            password: None,
            extract_tables: true,
            structure: StructureOptions::default(),
            tables: TableExtractorConfig::default(),
        }
    }
}

/// Error handling mode during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any error
    #[default]
    Strict,
    /// Skip pages with invalid content and continue
    Lenient,
}
