//! Fragment cleaning.
//!
//! Span extraction leaks page furniture into the text stream: running
//! headers, footer separators, bare page numbers. Cleaning drops those
//! lines before classification so they can never become headings or
//! leak into paragraph text.

/// Footer and header tokens dropped during cleaning, compared
/// case-insensitively after trimming.
const NOISE_TOKENS: [&str; 3] = ["page", "|", "page |"];

/// Split raw fragment text into cleaned lines.
///
/// Splits on line boundaries, trims each line, and drops lines that are
/// empty, match a noise token, or consist entirely of digits (running
/// page numbers, whatever their value). Surviving lines keep their
/// relative order. Pure; no side effects.
pub fn clean(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !is_noise(line))
        .map(String::from)
        .collect()
}

fn is_noise(line: &str) -> bool {
    let lower = line.to_lowercase();
    if NOISE_TOKENS.contains(&lower.as_str()) {
        return true;
    }
    line.chars().all(char::is_numeric)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_drops_empty_lines() {
        let lines = clean("First\n\n   \nSecond");
        assert_eq!(lines, vec!["First", "Second"]);
    }

    #[test]
    fn test_clean_trims_whitespace() {
        let lines = clean("  Fund Overview  ");
        assert_eq!(lines, vec!["Fund Overview"]);
    }

    #[test]
    fn test_clean_drops_noise_tokens_case_insensitively() {
        let lines = clean("Page\nPAGE |\n|\nKeep me");
        assert_eq!(lines, vec!["Keep me"]);
    }

    #[test]
    fn test_clean_drops_bare_page_numbers() {
        let lines = clean("12\nPortfolio\n2025\n007");
        assert_eq!(lines, vec!["Portfolio"]);
    }

    #[test]
    fn test_clean_keeps_mixed_alphanumeric() {
        // "Page 12" is not a bare token and not all digits
        let lines = clean("Page 12\nFY24 results");
        assert_eq!(lines, vec!["Page 12", "FY24 results"]);
    }

    #[test]
    fn test_clean_preserves_order() {
        let lines = clean("alpha\n3\nbeta\npage\ngamma");
        assert_eq!(lines, vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn test_clean_is_idempotent() {
        let input = "  NAV  \n10\npage |\nNet Asset Value\n\n| ";
        let once = clean(input);
        let twice = clean(&once.join("\n"));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_clean_empty_input() {
        assert!(clean("").is_empty());
        assert!(clean("\n\n").is_empty());
    }
}
