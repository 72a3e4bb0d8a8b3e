//! Integration tests for structure inference on synthetic fragments.
//!
//! These bypass PDF parsing entirely: fragments go straight through the
//! cleaning, classification, building, and merging passes, with tables
//! attached afterwards, the same order the parser runs them in.

use fundsheet::structure::{assemble_page, attach_tables, Fragment, StructureOptions};
use fundsheet::{Document, Node};

fn opts() -> StructureOptions {
    StructureOptions::default()
}

/// A condensed factsheet front page: display title, a period label set
/// in display type, overview prose, a key-figures label, footer noise.
fn front_page_fragments() -> Vec<Fragment> {
    vec![
        Fragment::new("FUND FACTSHEET", 16.0),
        Fragment::new("May-25", 15.0),
        Fragment::new("The scheme aims to generate", 9.0),
        Fragment::new("long-term capital appreciation.", 9.0),
        Fragment::new("KEY FIGURES", 12.5),
        Fragment::new("Data as of month end.", 8.0),
        Fragment::new("page |", 8.0),
        Fragment::new("3", 8.0),
    ]
}

#[test]
fn test_front_page_assembly() {
    let page = assemble_page(1, &front_page_fragments(), &opts());

    assert_eq!(page.page_number, 1);
    assert_eq!(page.content.len(), 1);

    let section = &page.content[0];
    assert_eq!(section.title(), Some("FUND FACTSHEET"));

    // Footer noise vanished entirely; everything else nests in order
    let children = section.children().unwrap();
    assert_eq!(children.len(), 2);

    // The period label is excluded from headings despite its size
    assert_eq!(
        children[0],
        Node::paragraph("May-25 The scheme aims to generate long-term capital appreciation.")
    );

    let key_figures = &children[1];
    assert_eq!(key_figures.title(), Some("KEY FIGURES"));
    assert!(matches!(key_figures, Node::Subsection { .. }));
    assert_eq!(
        key_figures.children().unwrap(),
        &[Node::paragraph("Data as of month end.")]
    );
}

#[test]
fn test_tables_attach_into_trailing_subsection() {
    let mut page = assemble_page(1, &front_page_fragments(), &opts());

    let grid = vec![
        vec!["NAV".to_string(), "42.17".to_string()],
        vec!["AUM".to_string(), "840 Cr".to_string()],
    ];
    attach_tables(&mut page, vec![grid.clone()]);

    // KEY FIGURES trails the last section, so the table descends into it
    let section = &page.content[0];
    let subsection = section.children().unwrap().last().unwrap();
    assert_eq!(subsection.title(), Some("KEY FIGURES"));
    assert_eq!(subsection.children().unwrap().last().unwrap(), &Node::table(grid));
}

#[test]
fn test_table_after_closing_prose_stays_at_root() {
    let fragments = vec![Fragment::new(
        "Standalone disclaimer prose with no heading above it.",
        9.0,
    )];
    let mut page = assemble_page(2, &fragments, &opts());

    attach_tables(&mut page, vec![vec![vec!["a".to_string(), "b".to_string()]]]);

    assert_eq!(page.content.len(), 2);
    assert!(page.content[0].is_paragraph());
    assert!(page.content[1].is_table());
}

#[test]
fn test_document_artifact_serialization() {
    let mut doc = Document::new();

    let mut page = assemble_page(1, &front_page_fragments(), &opts());
    attach_tables(
        &mut page,
        vec![vec![vec!["NAV".to_string(), "42.17".to_string()]]],
    );
    doc.add_page(page);
    doc.add_page(assemble_page(2, &[], &opts()));

    let json = doc.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    let pages = value.as_array().unwrap();
    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0]["page_number"], 1);
    assert_eq!(pages[0]["content"][0]["type"], "section");
    assert_eq!(pages[1]["page_number"], 2);
    assert!(pages[1]["content"].as_array().unwrap().is_empty());
}

#[test]
fn test_subsection_only_page() {
    // Body-size all-caps labels head their own subsections with no
    // section to hold them
    let fragments = vec![
        Fragment::new("TOP HOLDINGS", 9.0),
        Fragment::new("HDFC Bank 8.2%", 8.0),
        Fragment::new("SECTOR ALLOCATION", 9.0),
        Fragment::new("Financials 31.5%", 8.0),
    ];

    let page = assemble_page(1, &fragments, &opts());

    assert_eq!(page.content.len(), 2);
    assert_eq!(page.content[0].title(), Some("TOP HOLDINGS"));
    assert_eq!(
        page.content[0].children().unwrap(),
        &[Node::paragraph("HDFC Bank 8.2%")]
    );
    assert_eq!(page.content[1].title(), Some("SECTOR ALLOCATION"));
}

#[test]
fn test_heading_merge_requires_adjacency_and_short_titles() {
    let fragments = vec![
        Fragment::new("EQUITY", 16.0),
        Fragment::new("OUTLOOK", 16.0),
        Fragment::new("Markets stayed range-bound through the month.", 9.0),
        Fragment::new("PORTFOLIO COMMENTARY FROM THE DESK", 16.0),
        Fragment::new("RISK", 16.0),
    ];

    let page = assemble_page(1, &fragments, &opts());

    // First two sections merge; the long title blocks further merging
    let titles: Vec<_> = page.content.iter().filter_map(Node::title).collect();
    assert_eq!(
        titles,
        vec!["EQUITY OUTLOOK", "PORTFOLIO COMMENTARY FROM THE DESK", "RISK"]
    );
}

#[test]
fn test_multiline_fragment_splits_roles() {
    // One span carrying a label line and a prose line at body size
    let fragments = vec![Fragment::new("FUND MANAGER\nMs. A. Sharma since 2021", 9.0)];

    let page = assemble_page(1, &fragments, &opts());

    assert_eq!(page.content.len(), 1);
    let subsection = &page.content[0];
    assert_eq!(subsection.title(), Some("FUND MANAGER"));
    assert_eq!(
        subsection.children().unwrap(),
        &[Node::paragraph("Ms. A. Sharma since 2021")]
    );
}

#[test]
fn test_empty_fragment_list_yields_empty_page() {
    let page = assemble_page(7, &[], &opts());
    assert_eq!(page.page_number, 7);
    assert!(page.is_empty());
}
