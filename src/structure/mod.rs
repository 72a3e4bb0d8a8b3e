//! Structure inference for factsheet pages.
//!
//! Factsheets carry no logical markup, so the tree of sections,
//! subsections, paragraphs, and tables is inferred from typographic
//! cues. The passes run in a fixed order per page:
//!
//! 1. [`cleaner::clean`] filters extraction noise from fragment text.
//! 2. [`classifier::classify`] assigns each cleaned line a structural
//!    role from font size and text shape.
//! 3. [`builder::HierarchyBuilder`] assembles the page tree, buffering
//!    contiguous body lines into single paragraphs.
//! 4. [`merger::merge_headings`] repairs headings split across spans.
//! 5. [`attacher::attach_tables`] appends externally detected tables
//!    (a separate pass, after all text passes finish).

pub mod attacher;
pub mod builder;
pub mod classifier;
pub mod cleaner;
pub mod merger;

pub use attacher::attach_tables;
pub use builder::HierarchyBuilder;
pub use classifier::{classify, Level};
pub use cleaner::clean;
pub use merger::merge_headings;

use crate::model::Page;

/// One styled text fragment from the span extractor.
///
/// Transient: produced per page in visual reading order, consumed by the
/// builder, never serialized.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    /// Fragment text (may contain line breaks before cleaning)
    pub text: String,

    /// Effective font size in points
    pub font_size: f32,
}

impl Fragment {
    /// Create a new fragment.
    pub fn new(text: impl Into<String>, font_size: f32) -> Self {
        Self {
            text: text.into(),
            font_size,
        }
    }
}

/// Tunable thresholds for structure inference.
///
/// The defaults reproduce the factsheet heuristics; overriding them
/// adapts the pipeline to documents with a different type scale.
#[derive(Debug, Clone)]
pub struct StructureOptions {
    /// Minimum font size (points) for a section heading
    pub section_min_font_size: f32,

    /// Minimum font size (points) for a subsection heading
    pub subsection_min_font_size: f32,

    /// Titles that are sections regardless of font size
    /// (matched case-insensitively against the whole fragment)
    pub known_section_titles: Vec<String>,

    /// Maximum word count for the short all-caps label rule
    pub short_label_max_words: usize,

    /// Maximum per-title word count when merging adjacent sections
    pub merge_max_words: usize,
}

impl Default for StructureOptions {
    fn default() -> Self {
        Self {
            section_min_font_size: 14.0,
            subsection_min_font_size: 12.0,
            known_section_titles: vec![
                "FUND FACTSHEET".to_string(),
                "MONTHLY FACTSHEET".to_string(),
                "DISCLAIMER".to_string(),
            ],
            short_label_max_words: 4,
            merge_max_words: 2,
        }
    }
}

/// Run the text-side passes for one page: clean and classify every
/// fragment, build the tree, then repair split headings.
///
/// Tables are attached later by [`attach_tables`], once the table
/// extractor has run over the whole document.
pub fn assemble_page(
    page_number: u32,
    fragments: &[Fragment],
    options: &StructureOptions,
) -> Page {
    let mut builder = HierarchyBuilder::new(page_number, options);
    for fragment in fragments {
        builder.push(fragment);
    }
    let mut page = builder.finish();
    page.content = merge_headings(page.content, options.merge_max_words);
    page
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Node;

    // Factsheet front page: large title, small-print prose, a mid-size
    // heading after it.
    #[test]
    fn test_assemble_page_end_to_end() {
        let fragments = vec![
            Fragment::new("FUND FACTSHEET", 16.0),
            Fragment::new("Overview", 8.0),
            Fragment::new("This fund invests in equities.", 8.0),
            Fragment::new("RISK FACTORS", 13.0),
        ];

        let page = assemble_page(1, &fragments, &StructureOptions::default());

        assert_eq!(page.page_number, 1);
        assert_eq!(page.content.len(), 1);

        let section = &page.content[0];
        assert_eq!(section.title(), Some("FUND FACTSHEET"));

        let children = section.children().unwrap();
        assert_eq!(children.len(), 2);
        assert_eq!(
            children[0],
            Node::paragraph("Overview This fund invests in equities.")
        );
        // 13pt lands in the subsection band, nested under the open section.
        assert!(matches!(children[1], Node::Subsection { .. }));
        assert_eq!(children[1].title(), Some("RISK FACTORS"));
        assert!(children[1].children().unwrap().is_empty());
    }

    #[test]
    fn test_assemble_page_merges_split_title() {
        let fragments = vec![
            Fragment::new("FUND", 16.0),
            Fragment::new("FACTSHEET", 16.0),
            Fragment::new("The scheme seeks long-term growth.", 9.0),
        ];

        let page = assemble_page(1, &fragments, &StructureOptions::default());

        assert_eq!(page.content.len(), 1);
        assert_eq!(page.content[0].title(), Some("FUND FACTSHEET"));
        // The merge keeps the first section's children and drops the
        // second's, so the trailing prose goes with it.
        assert!(page.content[0].children().unwrap().is_empty());
    }

    #[test]
    fn test_assemble_empty_page() {
        let page = assemble_page(4, &[], &StructureOptions::default());
        assert_eq!(page.page_number, 4);
        assert!(page.is_empty());
    }
}
