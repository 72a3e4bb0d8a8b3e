//! Text-span extraction from page content streams.
//!
//! Walks the decoded content stream of a page, tracking the text matrix so
//! every shown string gets a position and an effective font size. Spans are
//! returned in reading order (top to bottom, left to right) but are never
//! merged here: a heading painted in several pieces stays in pieces, and
//! the structure passes decide what belongs together.

use std::collections::BTreeMap;

use lopdf::{Document as LopdfDocument, Object, ObjectId};
use unicode_normalization::UnicodeNormalization;

use crate::error::{Error, Result};
use crate::structure::Fragment;

/// A single positioned run of text from a content stream.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TextSpan {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub font_size: f32,
}

/// Extracts positioned text spans from document pages.
///
/// Uses lopdf's font encoding support for text decoding and falls back to
/// a byte-level guess for fonts without an encoding entry.
pub(crate) struct SpanExtractor<'a> {
    doc: &'a LopdfDocument,
}

impl<'a> SpanExtractor<'a> {
    pub fn new(doc: &'a LopdfDocument) -> Self {
        Self { doc }
    }

    /// Extract all text spans from a page, sorted into reading order.
    pub fn extract_page_spans(&self, page_num: u32) -> Result<Vec<TextSpan>> {
        let pages = self.doc.get_pages();
        let page_id = pages
            .get(&page_num)
            .copied()
            .ok_or(Error::PageOutOfRange(page_num, pages.len() as u32))?;

        let fonts = self.doc.get_page_fonts(page_id).map_err(|e| Error::TextExtract {
            page: page_num,
            reason: e.to_string(),
        })?;

        let content = get_page_content(self.doc, page_id).map_err(|e| Error::TextExtract {
            page: page_num,
            reason: e.to_string(),
        })?;

        let spans = self.walk_content_stream(page_num, &content, &fonts)?;
        log::debug!("Page {}: {} text spans", page_num, spans.len());
        Ok(sort_reading_order(spans))
    }

    /// Extract a page's text as classifier fragments, one per span,
    /// reading order preserved.
    pub fn extract_page_fragments(&self, page_num: u32) -> Result<Vec<Fragment>> {
        let spans = self.extract_page_spans(page_num)?;
        Ok(spans
            .into_iter()
            .map(|s| Fragment::new(s.text, s.font_size))
            .collect())
    }

    /// Walk the text operators of one content stream, emitting a span per
    /// shown string.
    fn walk_content_stream(
        &self,
        page_num: u32,
        content: &[u8],
        fonts: &BTreeMap<Vec<u8>, &lopdf::Dictionary>,
    ) -> Result<Vec<TextSpan>> {
        let content = lopdf::content::Content::decode(content).map_err(|e| Error::TextExtract {
            page: page_num,
            reason: e.to_string(),
        })?;

        let mut spans = Vec::new();
        let mut current_font: Vec<u8> = Vec::new();
        let mut current_font_size: f32 = 12.0;
        let mut text_matrix = TextMatrix::default();
        let mut in_text_block = false;

        for op in content.operations {
            match op.operator.as_str() {
                "BT" => {
                    in_text_block = true;
                    text_matrix = TextMatrix::default();
                }
                "ET" => {
                    in_text_block = false;
                }
                "Tf" => {
                    if op.operands.len() >= 2 {
                        if let Object::Name(name) = &op.operands[0] {
                            current_font = name.clone();
                        }
                        current_font_size = get_number(&op.operands[1]).unwrap_or(12.0);
                    }
                }
                "Td" | "TD" => {
                    if op.operands.len() >= 2 {
                        let tx = get_number(&op.operands[0]).unwrap_or(0.0);
                        let ty = get_number(&op.operands[1]).unwrap_or(0.0);
                        text_matrix.translate(tx, ty);
                    }
                }
                "Tm" => {
                    if op.operands.len() >= 6 {
                        text_matrix.set(
                            get_number(&op.operands[0]).unwrap_or(1.0),
                            get_number(&op.operands[1]).unwrap_or(0.0),
                            get_number(&op.operands[2]).unwrap_or(0.0),
                            get_number(&op.operands[3]).unwrap_or(1.0),
                            get_number(&op.operands[4]).unwrap_or(0.0),
                            get_number(&op.operands[5]).unwrap_or(0.0),
                        );
                    }
                }
                "T*" => {
                    text_matrix.next_line();
                }
                "Tj" => {
                    if in_text_block {
                        if let Some(Object::String(bytes, _)) = op.operands.first() {
                            let text = decode_with_font(self.doc, fonts, &current_font, bytes);
                            push_span(&mut spans, text, &text_matrix, current_font_size);
                        }
                    }
                }
                "TJ" => {
                    if in_text_block {
                        if let Some(Object::Array(items)) = op.operands.first() {
                            let text = decode_tj_array(self.doc, fonts, &current_font, items);
                            push_span(&mut spans, text, &text_matrix, current_font_size);
                        }
                    }
                }
                "'" | "\"" => {
                    text_matrix.next_line();
                    if in_text_block {
                        let text_idx = if op.operator == "\"" { 2 } else { 0 };
                        if let Some(Object::String(bytes, _)) = op.operands.get(text_idx) {
                            let text = decode_with_font(self.doc, fonts, &current_font, bytes);
                            push_span(&mut spans, text, &text_matrix, current_font_size);
                        }
                    }
                }
                _ => {}
            }
        }

        Ok(spans)
    }
}

/// Assemble a page's full content stream, following references and
/// concatenating array parts.
pub(crate) fn get_page_content(doc: &LopdfDocument, page_id: ObjectId) -> Result<Vec<u8>> {
    let page_dict = doc
        .get_dictionary(page_id)
        .map_err(|e| Error::PdfParse(e.to_string()))?;

    let contents = page_dict
        .get(b"Contents")
        .map_err(|e| Error::PdfParse(e.to_string()))?;

    match contents {
        Object::Reference(r) => {
            if let Ok(Object::Stream(s)) = doc.get_object(*r) {
                return s
                    .decompressed_content()
                    .map_err(|e| Error::PdfParse(e.to_string()));
            }
            Err(Error::PdfParse("Invalid content stream".to_string()))
        }
        Object::Array(arr) => {
            let mut content = Vec::new();
            for obj in arr {
                if let Object::Reference(r) = obj {
                    if let Ok(Object::Stream(s)) = doc.get_object(*r) {
                        if let Ok(data) = s.decompressed_content() {
                            content.extend_from_slice(&data);
                            content.push(b' ');
                        }
                    }
                }
            }
            Ok(content)
        }
        _ => Err(Error::PdfParse("Invalid content stream".to_string())),
    }
}

/// Text matrix state for the Tm/Td/TD/T* operators.
///
/// Only position and scale are consumed downstream, so the full graphics
/// state stack is not modeled.
#[derive(Debug, Clone)]
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }
}

impl TextMatrix {
    fn set(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) {
        self.a = a;
        self.b = b;
        self.c = c;
        self.d = d;
        self.e = e;
        self.f = f;
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.e += tx * self.a + ty * self.c;
        self.f += tx * self.b + ty * self.d;
    }

    fn next_line(&mut self) {
        // Default line leading (could be set by TL operator)
        self.f -= 12.0 * self.d;
    }

    fn get_position(&self) -> (f32, f32) {
        (self.e, self.f)
    }

    fn get_scale(&self) -> f32 {
        (self.a * self.a + self.c * self.c).sqrt()
    }
}

/// Append a span unless the decoded text is blank. Text is normalized to
/// NFC so downstream comparisons see composed characters.
fn push_span(spans: &mut Vec<TextSpan>, text: String, matrix: &TextMatrix, font_size: f32) {
    if text.trim().is_empty() {
        return;
    }
    let (x, y) = matrix.get_position();
    spans.push(TextSpan {
        text: text.nfc().collect(),
        x,
        y,
        font_size: font_size * matrix.get_scale(),
    });
}

/// Order spans top to bottom, left to right. Spans whose baselines differ
/// by less than 30% of the font size count as the same visual row.
fn sort_reading_order(mut spans: Vec<TextSpan>) -> Vec<TextSpan> {
    spans.sort_by(|a, b| {
        let y_cmp = b.y.partial_cmp(&a.y).unwrap_or(std::cmp::Ordering::Equal);
        if y_cmp == std::cmp::Ordering::Equal {
            a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal)
        } else {
            y_cmp
        }
    });

    let mut ordered: Vec<TextSpan> = Vec::with_capacity(spans.len());
    let mut row: Vec<TextSpan> = Vec::new();
    let mut row_y: Option<f32> = None;

    for span in spans {
        let y_tolerance = span.font_size * 0.3;
        let same_row = match row_y {
            Some(y) => (span.y - y).abs() <= y_tolerance,
            None => false,
        };
        if !same_row {
            flush_row(&mut ordered, &mut row);
            row_y = Some(span.y);
        }
        row.push(span);
    }
    flush_row(&mut ordered, &mut row);

    ordered
}

fn flush_row(ordered: &mut Vec<TextSpan>, row: &mut Vec<TextSpan>) {
    row.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal));
    ordered.append(row);
}

/// Join a TJ array into one string, inserting a space wherever a kerning
/// adjustment is wide enough to be a word break.
fn decode_tj_array(
    doc: &LopdfDocument,
    fonts: &BTreeMap<Vec<u8>, &lopdf::Dictionary>,
    font_name: &[u8],
    items: &[Object],
) -> String {
    // Adjustments are in 1/1000 text space units; large negative values
    // are word spaces the font omits.
    const SPACE_THRESHOLD: f32 = 200.0;

    let mut combined = String::new();
    for item in items {
        match item {
            Object::String(bytes, _) => {
                combined.push_str(&decode_with_font(doc, fonts, font_name, bytes));
            }
            _ => {
                if let Some(n) = get_number(item) {
                    if -n > SPACE_THRESHOLD {
                        push_word_space(&mut combined);
                    }
                }
            }
        }
    }
    combined
}

/// Append a word space unless the text already ends in one or the script
/// does not use them.
fn push_word_space(text: &mut String) {
    if text.is_empty() || text.ends_with(' ') || text.ends_with('\u{00A0}') {
        return;
    }
    if let Some(c) = text.chars().last() {
        if !is_spaceless_script_char(c) {
            text.push(' ');
        }
    }
}

/// Decode string bytes with the current font's encoding, falling back to
/// a BOM/UTF-8/Latin-1 guess when the font carries none.
fn decode_with_font(
    doc: &LopdfDocument,
    fonts: &BTreeMap<Vec<u8>, &lopdf::Dictionary>,
    font_name: &[u8],
    bytes: &[u8],
) -> String {
    match fonts.get(font_name).and_then(|f| f.get_font_encoding(doc).ok()) {
        Some(enc) => LopdfDocument::decode_text(&enc, bytes).unwrap_or_default(),
        None => decode_text_simple(bytes),
    }
}

/// Simple text decoding fallback when no encoding is available.
fn decode_text_simple(bytes: &[u8]) -> String {
    // UTF-16BE with BOM marker
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
        return String::from_utf16(&utf16).unwrap_or_default();
    }

    if let Ok(s) = String::from_utf8(bytes.to_vec()) {
        return s;
    }

    // Fallback: Latin-1
    bytes.iter().map(|&b| b as char).collect()
}

/// Check if a character is from a script that does not use word spaces.
/// Chinese and Japanese qualify; Korean uses spaces like English.
fn is_spaceless_script_char(c: char) -> bool {
    let code = c as u32;

    // CJK Unified Ideographs and extensions
    (0x4E00..=0x9FFF).contains(&code)
        || (0x3400..=0x4DBF).contains(&code)
        || (0x20000..=0x2A6DF).contains(&code)
        || (0x2A700..=0x2B73F).contains(&code)
        || (0x2B740..=0x2B81F).contains(&code)
        || (0x2B820..=0x2CEAF).contains(&code)
        || (0x2CEB0..=0x2EBEF).contains(&code)
        // Hiragana and Katakana
        || (0x3040..=0x309F).contains(&code)
        || (0x30A0..=0x30FF).contains(&code)
        // CJK symbols and punctuation
        || (0x3000..=0x303F).contains(&code)
}

/// Helper to extract a number from a PDF object.
fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}
