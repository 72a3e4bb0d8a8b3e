//! Fragment role classification.
//!
//! A cleaned line becomes a section heading, a subsection heading, or
//! body text based on font size, capitalization, and word count. The
//! rules live in an ordered table evaluated first-match-wins; the date
//! exclusion must stay ahead of the size rules because period labels
//! like "FY24" are often set in display type.

use once_cell::sync::Lazy;
use regex::Regex;

use super::StructureOptions;

/// Structural role of one cleaned fragment line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Body prose, buffered into paragraphs
    Body,
    /// Top-level section heading
    Section,
    /// Subsection heading
    Subsection,
}

/// Date and reporting-period tokens: fiscal years ("FY24"), bare years
/// ("2025"), month-year forms ("May-25", "Sep 2024", "September 2024").
static DATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(FY\d{2}|\d{4}|[A-Za-z]{3}-\d{2}|(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*[- ]?\d{2,4})$",
    )
    .unwrap()
});

/// One classification rule. The table below is evaluated in order and
/// the first match wins, so narrower rules must stay ahead of broader
/// ones.
struct Rule {
    name: &'static str,
    level: Level,
    matches: fn(&str, f32, &StructureOptions) -> bool,
}

const RULES: [Rule; 4] = [
    Rule {
        name: "date-exclusion",
        level: Level::Body,
        matches: is_date_token,
    },
    Rule {
        name: "section",
        level: Level::Section,
        matches: is_section,
    },
    Rule {
        name: "subsection",
        level: Level::Subsection,
        matches: is_subsection,
    },
    // Subsumed by "subsection" (which already accepts any all-caps
    // text), but kept as its own entry so the short-label intent stays
    // visible and independently testable.
    Rule {
        name: "short-caps-label",
        level: Level::Subsection,
        matches: is_short_caps_label,
    },
];

fn is_date_token(text: &str, _font_size: f32, _options: &StructureOptions) -> bool {
    DATE_PATTERN.is_match(text)
}

fn is_section(text: &str, font_size: f32, options: &StructureOptions) -> bool {
    font_size >= options.section_min_font_size
        || options
            .known_section_titles
            .iter()
            .any(|title| text.eq_ignore_ascii_case(title))
}

fn is_subsection(text: &str, font_size: f32, options: &StructureOptions) -> bool {
    (font_size >= options.subsection_min_font_size
        && font_size < options.section_min_font_size)
        || is_uppercase(text)
}

fn is_short_caps_label(text: &str, _font_size: f32, options: &StructureOptions) -> bool {
    text.split_whitespace().count() <= options.short_label_max_words && is_uppercase(text)
}

/// Classify one cleaned line into its structural role.
///
/// Pure and deterministic. A line that matches no rule is body text;
/// ambiguity is never an error.
pub fn classify(text: &str, font_size: f32, options: &StructureOptions) -> Level {
    let text = text.trim();
    for rule in &RULES {
        if (rule.matches)(text, font_size, options) {
            return rule.level;
        }
    }
    Level::Body
}

/// A string counts as uppercase only if it has at least one letter and
/// every letter is uppercase. Digits and punctuation alone never
/// qualify.
fn is_uppercase(text: &str) -> bool {
    let mut has_letter = false;
    for c in text.chars().filter(|c| c.is_alphabetic()) {
        if !c.is_uppercase() {
            return false;
        }
        has_letter = true;
    }
    has_letter
}
