//! Factsheet parser built on lopdf.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use lopdf::Document as LopdfDocument;

use crate::detect::detect_format;
use crate::error::{Error, Result};
use crate::model::{Document, Metadata, Page};
use crate::structure::{assemble_page, attach_tables};

use super::options::{ErrorMode, ParseOptions};
use super::spans::SpanExtractor;
use super::tables::TableExtractor;

/// Parser that converts a factsheet PDF into a structured [`Document`].
///
/// Parsing runs in two phases over the whole file: a text phase that
/// builds every page tree, then a table phase that scans every page for
/// ruled tables before any of them is attached.
pub struct FactsheetParser {
    doc: LopdfDocument,
    options: ParseOptions,
}

impl FactsheetParser {
    /// Open a factsheet PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a factsheet PDF file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let path = path.as_ref();

        // Verify it's a PDF
        detect_format(path)?;

        // Load document
        let doc = LopdfDocument::load(path).map_err(|e| match e {
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::from(e),
        })?;

        Self::with_document(doc, options)
    }

    /// Parse a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Parse a PDF from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        let doc = LopdfDocument::load_mem(data).map_err(|e| match e {
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::from(e),
        })?;

        Self::with_document(doc, options)
    }

    /// Parse a PDF from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, ParseOptions::default())
    }

    /// Parse a PDF from a reader with custom options.
    pub fn from_reader_with_options<R: Read>(mut reader: R, options: ParseOptions) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes_with_options(&data, options)
    }

    fn with_document(doc: LopdfDocument, options: ParseOptions) -> Result<Self> {
        // Note: Password-protected PDFs are not yet supported in lopdf 0.34
        // TODO: Add password support when lopdf adds this feature
        if options.password.is_some() && doc.is_encrypted() {
            log::warn!("Password was provided but lopdf 0.34 doesn't support decryption");
        }

        Ok(Self { doc, options })
    }

    /// Parse the factsheet and return a structured Document.
    pub fn parse(&self) -> Result<Document> {
        let mut document = Document::new();

        // Extract metadata
        document.metadata = self.extract_metadata()?;

        let page_ids = self.doc.get_pages();
        document.metadata.page_count = page_ids.len() as u32;

        // Text phase: every selected page gets its tree before any
        // table work starts.
        let extractor = SpanExtractor::new(&self.doc);
        for (&page_num, _page_id) in page_ids.iter() {
            // Check page selection
            if !self.options.pages.includes(page_num) {
                continue;
            }

            match extractor.extract_page_fragments(page_num) {
                Ok(fragments) => {
                    let page = assemble_page(page_num, &fragments, &self.options.structure);
                    document.add_page(page);
                }
                Err(e) => {
                    if self.options.error_mode == ErrorMode::Strict {
                        return Err(e);
                    }
                    // In lenient mode, keep the page with no content
                    log::warn!("Failed to extract text from page {}: {}", page_num, e);
                    document.add_page(Page::new(page_num));
                }
            }
        }

        // Table phase
        if self.options.extract_tables {
            self.attach_document_tables(&mut document)?;
        }

        Ok(document)
    }

    /// Scan every converted page for ruled tables, then attach them.
    ///
    /// The scan completes over the whole document before the first
    /// attachment, so a failure on a late page in strict mode leaves no
    /// page partially updated.
    fn attach_document_tables(&self, document: &mut Document) -> Result<()> {
        let extractor = TableExtractor::with_config(&self.doc, self.options.tables.clone());

        let mut tables_by_page: BTreeMap<u32, Vec<Vec<Vec<String>>>> = BTreeMap::new();
        for page in document.pages.iter() {
            match extractor.extract_page_tables(page.page_number) {
                Ok(tables) => {
                    if !tables.is_empty() {
                        tables_by_page.insert(page.page_number, tables);
                    }
                }
                Err(e) => {
                    if self.options.error_mode == ErrorMode::Strict {
                        return Err(e);
                    }
                    log::warn!(
                        "Failed to extract tables from page {}: {}",
                        page.page_number,
                        e
                    );
                }
            }
        }

        for page in document.pages.iter_mut() {
            if let Some(tables) = tables_by_page.remove(&page.page_number) {
                attach_tables(page, tables);
            }
        }

        Ok(())
    }

    /// Extract document metadata.
    fn extract_metadata(&self) -> Result<Metadata> {
        let mut metadata = Metadata::with_version(self.doc.version.to_string());

        // Try to get document info dictionary
        if let Ok(info) = self.doc.trailer.get(b"Info") {
            if let Ok(info_ref) = info.as_reference() {
                if let Ok(info_dict) = self.doc.get_dictionary(info_ref) {
                    metadata.title = get_string_from_dict(info_dict, b"Title");
                    metadata.author = get_string_from_dict(info_dict, b"Author");
                    metadata.subject = get_string_from_dict(info_dict, b"Subject");
                    metadata.keywords = get_string_from_dict(info_dict, b"Keywords");
                    metadata.creator = get_string_from_dict(info_dict, b"Creator");
                    metadata.producer = get_string_from_dict(info_dict, b"Producer");

                    // Parse dates
                    if let Some(date_str) = get_string_from_dict(info_dict, b"CreationDate") {
                        metadata.created = parse_pdf_date(&date_str);
                    }
                    if let Some(date_str) = get_string_from_dict(info_dict, b"ModDate") {
                        metadata.modified = parse_pdf_date(&date_str);
                    }
                }
            }
        }

        // Check if encrypted
        metadata.encrypted = self.doc.is_encrypted();

        Ok(metadata)
    }

    /// Get the total number of pages in the source document.
    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// Check if the document is encrypted.
    pub fn is_encrypted(&self) -> bool {
        self.doc.is_encrypted()
    }

    /// Get the PDF version string.
    pub fn version(&self) -> String {
        self.doc.version.to_string()
    }
}

/// Helper to get a string from a PDF dictionary.
fn get_string_from_dict(dict: &lopdf::Dictionary, key: &[u8]) -> Option<String> {
    dict.get(key).ok().and_then(|obj| {
        match obj {
            lopdf::Object::String(bytes, _) => {
                // Try UTF-16BE first (PDF standard for Unicode)
                if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
                    let utf16: Vec<u16> = bytes[2..]
                        .chunks(2)
                        .filter_map(|c| {
                            if c.len() == 2 {
                                Some(u16::from_be_bytes([c[0], c[1]]))
                            } else {
                                None
                            }
                        })
                        .collect();
                    String::from_utf16(&utf16).ok()
                } else {
                    // Try as Latin-1 or UTF-8
                    String::from_utf8(bytes.clone())
                        .ok()
                        .or_else(|| Some(bytes.iter().map(|&b| b as char).collect()))
                }
            }
            lopdf::Object::Name(bytes) => String::from_utf8(bytes.clone()).ok(),
            _ => None,
        }
    })
}

/// Parse a PDF date string (D:YYYYMMDDHHmmSSOHH'mm').
fn parse_pdf_date(s: &str) -> Option<chrono::DateTime<chrono::Utc>> {
    let s = s.strip_prefix("D:")?;

    // At minimum we need YYYY
    if s.len() < 4 {
        return None;
    }

    let year: i32 = s.get(0..4)?.parse().ok()?;
    let month: u32 = s.get(4..6).and_then(|m| m.parse().ok()).unwrap_or(1);
    let day: u32 = s.get(6..8).and_then(|d| d.parse().ok()).unwrap_or(1);
    let hour: u32 = s.get(8..10).and_then(|h| h.parse().ok()).unwrap_or(0);
    let minute: u32 = s.get(10..12).and_then(|m| m.parse().ok()).unwrap_or(0);
    let second: u32 = s.get(12..14).and_then(|s| s.parse().ok()).unwrap_or(0);

    chrono::NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, second))
        .map(|dt| chrono::DateTime::from_naive_utc_and_offset(dt, chrono::Utc))
}
