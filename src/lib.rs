//! # fundsheet
//!
//! Mutual-fund factsheet PDF to structured JSON converter.
//!
//! Factsheets carry no logical markup, so this library rebuilds their
//! hierarchy from typography: font sizes pick out section and subsection
//! headings, consecutive body lines collapse into paragraphs, and tables
//! are lifted from the page's ruling lines. The result is one tree per
//! page, serialized as a JSON array.
//!
//! ## Quick Start
//!
//! ```no_run
//! use fundsheet::parse_file;
//!
//! fn main() -> fundsheet::Result<()> {
//!     // Parse a factsheet PDF
//!     let doc = parse_file("factsheet.pdf")?;
//!
//!     // Serialize the page trees
//!     let json = doc.to_json()?;
//!     println!("{}", json);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Hierarchical output**: sections, subsections, paragraphs, tables
//! - **Typographic heuristics**: headings inferred from font size and shape
//! - **Ruled-table extraction**: grids rebuilt from the page's line work
//! - **Noise filtering**: page numbers, bullets, and artifacts dropped
//! - **Tunable thresholds**: adapt the heading type scale per fund house

pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;
pub mod structure;

// Re-export commonly used types
pub use detect::{detect_format, detect_format_from_bytes, is_pdf, PdfFormat};
pub use error::{Error, Result};
pub use model::{Document, Metadata, Node, Page};
pub use parser::{ErrorMode, FactsheetParser, ParseOptions, TableExtractorConfig};
pub use render::{JsonFormat, PageSelection};
pub use structure::{Fragment, StructureOptions};

use std::io::Read;
use std::path::Path;

/// Parse a factsheet PDF file and return a structured document.
///
/// # Arguments
///
/// * `path` - Path to the PDF file
///
/// # Returns
///
/// A `Result` containing the parsed `Document` or an error.
///
/// # Example
///
/// ```no_run
/// use fundsheet::parse_file;
///
/// let doc = parse_file("factsheet.pdf").unwrap();
/// println!("Pages: {}", doc.page_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    let parser = FactsheetParser::open(path)?;
    parser.parse()
}

/// Parse a factsheet PDF file with custom options.
///
/// # Arguments
///
/// * `path` - Path to the PDF file
/// * `options` - Parsing options
///
/// # Example
///
/// ```no_run
/// use fundsheet::{parse_file_with_options, ParseOptions};
///
/// let options = ParseOptions::new()
///     .lenient()
///     .text_only();
/// let doc = parse_file_with_options("factsheet.pdf", options).unwrap();
/// ```
pub fn parse_file_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Document> {
    let parser = FactsheetParser::open_with_options(path, options)?;
    parser.parse()
}

/// Parse a factsheet PDF from bytes.
///
/// # Arguments
///
/// * `data` - PDF file content as bytes
///
/// # Example
///
/// ```no_run
/// use fundsheet::parse_bytes;
///
/// let data = std::fs::read("factsheet.pdf").unwrap();
/// let doc = parse_bytes(&data).unwrap();
/// ```
pub fn parse_bytes(data: &[u8]) -> Result<Document> {
    let parser = FactsheetParser::from_bytes(data)?;
    parser.parse()
}

/// Parse a factsheet PDF from bytes with custom options.
pub fn parse_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Document> {
    let parser = FactsheetParser::from_bytes_with_options(data, options)?;
    parser.parse()
}

/// Parse a factsheet PDF from a reader.
///
/// # Arguments
///
/// * `reader` - Any type implementing `Read`
///
/// # Example
///
/// ```no_run
/// use fundsheet::parse_reader;
/// use std::fs::File;
///
/// let file = File::open("factsheet.pdf").unwrap();
/// let doc = parse_reader(file).unwrap();
/// ```
pub fn parse_reader<R: Read>(reader: R) -> Result<Document> {
    let parser = FactsheetParser::from_reader(reader)?;
    parser.parse()
}

/// Parse a factsheet PDF from a reader with custom options.
pub fn parse_reader_with_options<R: Read>(reader: R, options: ParseOptions) -> Result<Document> {
    let parser = FactsheetParser::from_reader_with_options(reader, options)?;
    parser.parse()
}

/// Parse a password-protected factsheet PDF file.
///
/// # Arguments
///
/// * `path` - Path to the PDF file
/// * `password` - Document password
///
/// # Example
///
/// ```no_run
/// use fundsheet::parse_file_with_password;
///
/// let doc = parse_file_with_password("encrypted.pdf", "secret").unwrap();
/// ```
pub fn parse_file_with_password<P: AsRef<Path>>(path: P, password: &str) -> Result<Document> {
    let options = ParseOptions::new().with_password(password);
    parse_file_with_options(path, options)
}

/// Convert a factsheet PDF straight to its JSON artifact.
///
/// # Example
///
/// ```no_run
/// use fundsheet::{to_json, JsonFormat};
///
/// let json = to_json("factsheet.pdf", JsonFormat::Pretty).unwrap();
/// std::fs::write("factsheet.json", json).unwrap();
/// ```
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let doc = parse_file(path)?;
    render::to_json(&doc, format)
}

/// Builder for parsing factsheet documents.
///
/// # Example
///
/// ```no_run
/// use fundsheet::{Factsheet, PageSelection};
///
/// let doc = Factsheet::new()
///     .lenient()
///     .with_pages(PageSelection::Range(1..=4))
///     .open("factsheet.pdf")?;
/// let json = doc.to_json()?;
/// # Ok::<(), fundsheet::Error>(())
/// ```
pub struct Factsheet {
    options: ParseOptions,
}

impl Factsheet {
    /// Create a new Factsheet builder.
    pub fn new() -> Self {
        Self {
            options: ParseOptions::default(),
        }
    }

    /// Enable lenient parsing mode.
    pub fn lenient(mut self) -> Self {
        self.options = self.options.lenient();
        self
    }

    /// Skip table extraction; pages carry text structure only.
    pub fn text_only(mut self) -> Self {
        self.options = self.options.text_only();
        self
    }

    /// Set document password.
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.options = self.options.with_password(password);
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.options = self.options.with_pages(pages);
        self
    }

    /// Override the structure inference thresholds.
    pub fn with_structure(mut self, structure: StructureOptions) -> Self {
        self.options = self.options.with_structure(structure);
        self
    }

    /// Override the table extractor configuration.
    pub fn with_tables(mut self, tables: TableExtractorConfig) -> Self {
        self.options = self.options.with_tables(tables);
        self
    }

    /// Parse a factsheet PDF file.
    pub fn open<P: AsRef<Path>>(self, path: P) -> Result<Document> {
        let parser = FactsheetParser::open_with_options(path, self.options)?;
        parser.parse()
    }

    /// Parse a factsheet PDF from bytes.
    pub fn from_bytes(self, data: &[u8]) -> Result<Document> {
        let parser = FactsheetParser::from_bytes_with_options(data, self.options)?;
        parser.parse()
    }
}

impl Default for Factsheet {
    fn default() -> Self {
        Self::new()
    }
}
