//! Split-heading repair.
//!
//! Extraction frequently splits one visual heading into consecutive
//! spans with the same display size, each classifying as its own
//! section. This pass stitches adjacent sections back together when
//! both titles are short enough to be fragments of a single heading.

use crate::model::Node;

/// Merge adjacent section nodes whose titles each have at most
/// `max_words` words, scanning left to right with a one-element
/// buffer. The held title grows as it absorbs neighbors and its word
/// count is re-checked against every next candidate, so a chain merges
/// only while each step stays short.
///
/// The absorbed node is dropped wholesale: its title joins the held
/// title, its children do not survive. Split headings have no children
/// in practice, and downstream consumers depend on this shape.
pub fn merge_headings(content: Vec<Node>, max_words: usize) -> Vec<Node> {
    let mut merged: Vec<Node> = Vec::with_capacity(content.len());
    let mut pending: Option<Node> = None;

    for node in content {
        match pending.take() {
            None => pending = Some(node),
            Some(mut held) => {
                if should_merge(&held, &node, max_words) {
                    if let (Node::Section { title, .. }, Node::Section { title: incoming, .. }) =
                        (&mut held, &node)
                    {
                        title.push(' ');
                        title.push_str(incoming);
                    }
                    pending = Some(held);
                } else {
                    merged.push(held);
                    pending = Some(node);
                }
            }
        }
    }

    if let Some(held) = pending {
        merged.push(held);
    }

    merged
}

fn should_merge(held: &Node, incoming: &Node, max_words: usize) -> bool {
    match (held, incoming) {
        (Node::Section { title: a, .. }, Node::Section { title: b, .. }) => {
            word_count(a) <= max_words && word_count(b) <= max_words
        }
        _ => false,
    }
}

fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merges_adjacent_short_sections() {
        let content = vec![
            Node::section("FUND"),
            Node::section("FACTSHEET"),
            Node::paragraph("x"),
        ];

        let merged = merge_headings(content, 2);

        assert_eq!(
            merged,
            vec![Node::section("FUND FACTSHEET"), Node::paragraph("x")]
        );
    }

    #[test]
    fn test_no_merge_when_first_title_too_long() {
        let content = vec![
            Node::section("Annual Report Summary"),
            Node::section("B"),
        ];

        let merged = merge_headings(content, 2);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].title(), Some("Annual Report Summary"));
        assert_eq!(merged[1].title(), Some("B"));
    }

    #[test]
    fn test_no_merge_when_second_title_too_long() {
        let content = vec![
            Node::section("B"),
            Node::section("Annual Report Summary"),
        ];

        let merged = merge_headings(content, 2);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_chain_merge_reevaluates_growing_title() {
        // "EQUITY" + "FUND" merge to a two-word title, which may then
        // absorb "FACTSHEET"; the three-word result blocks "EXTRA".
        let content = vec![
            Node::section("EQUITY"),
            Node::section("FUND"),
            Node::section("FACTSHEET"),
            Node::section("EXTRA"),
        ];

        let merged = merge_headings(content, 2);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].title(), Some("EQUITY FUND FACTSHEET"));
        assert_eq!(merged[1].title(), Some("EXTRA"));
    }

    #[test]
    fn test_non_section_neighbors_pass_through() {
        let content = vec![
            Node::section("FUND"),
            Node::paragraph("between"),
            Node::section("FACTSHEET"),
        ];

        let merged = merge_headings(content, 2);

        assert_eq!(merged.len(), 3);
        assert_eq!(merged[0].title(), Some("FUND"));
        assert_eq!(merged[2].title(), Some("FACTSHEET"));
    }

    #[test]
    fn test_subsections_never_merge() {
        let content = vec![Node::subsection("NAV"), Node::subsection("AUM")];
        let merged = merge_headings(content, 2);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_first_sections_children_survive_merge() {
        let mut first = Node::section("FUND");
        first
            .children_mut()
            .unwrap()
            .push(Node::paragraph("kept prose"));

        let merged = merge_headings(vec![first, Node::section("FACTSHEET")], 2);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].title(), Some("FUND FACTSHEET"));
        assert_eq!(
            merged[0].children().unwrap(),
            &[Node::paragraph("kept prose")]
        );
    }

    #[test]
    fn test_absorbed_sections_children_are_dropped() {
        let mut second = Node::section("FACTSHEET");
        second
            .children_mut()
            .unwrap()
            .push(Node::paragraph("lost prose"));

        let merged = merge_headings(vec![Node::section("FUND"), second], 2);

        assert_eq!(merged.len(), 1);
        assert!(merged[0].children().unwrap().is_empty());
    }

    #[test]
    fn test_empty_content_stays_empty() {
        assert!(merge_headings(Vec::new(), 2).is_empty());
    }

    #[test]
    fn test_single_node_passes_through() {
        let merged = merge_headings(vec![Node::section("ONLY")], 2);
        assert_eq!(merged, vec![Node::section("ONLY")]);
    }
}
