//! Inline markup used inside free-text fields.
//!
//! Introductions and achievement lines carry two conventions: `**keyword**`
//! marks emphasis, and leading indentation on an achievement line marks a
//! nested bullet. Neither is a Markdown parser; both are literal splitters.

use serde::Serialize;

const EMPHASIS_DELIMITER: &str = "**";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextSegment {
    pub text: String,
    pub emphasized: bool,
}

/// Splits `text` on `**`, toggling emphasis at every delimiter.
///
/// Empty segments are dropped. An unpaired delimiter still toggles, so
/// `"a**b"` yields `a` plain followed by `b` emphasized.
pub fn split_emphasis(text: &str) -> Vec<TextSegment> {
    text.split(EMPHASIS_DELIMITER)
        .enumerate()
        .filter(|(_, part)| !part.is_empty())
        .map(|(i, part)| TextSegment {
            text: part.to_string(),
            emphasized: i % 2 == 1,
        })
        .collect()
}

/// Inverse of [`split_emphasis`] for well-formed input.
pub fn join_emphasis(segments: &[TextSegment]) -> String {
    segments
        .iter()
        .map(|s| {
            if s.emphasized {
                format!("{EMPHASIS_DELIMITER}{}{EMPHASIS_DELIMITER}", s.text)
            } else {
                s.text.clone()
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Achievement {
    /// Nesting depth, 0 for a top-level bullet.
    pub level: usize,
    pub text: String,
    pub segments: Vec<TextSegment>,
}

/// Leading whitespace width: a space counts 1, a tab counts 2.
fn indent_width(line: &str) -> usize {
    line.chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .map(|c| if c == '\t' { 2 } else { 1 })
        .sum()
}

pub fn parse_achievement(line: &str) -> Achievement {
    let text = line.trim().to_string();
    Achievement {
        level: indent_width(line) / 2,
        segments: split_emphasis(&text),
        text,
    }
}

/// Parses every non-blank line. Input order is preserved.
pub fn parse_achievements<S: AsRef<str>>(lines: &[S]) -> Vec<Achievement> {
    lines
        .iter()
        .map(AsRef::as_ref)
        .filter(|line| !line.trim().is_empty())
        .map(parse_achievement)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(segments: &[TextSegment]) -> Vec<(&str, bool)> {
        segments.iter().map(|s| (s.text.as_str(), s.emphasized)).collect()
    }

    #[test]
    fn test_split_emphasis_toggles_on_delimiters() {
        let segments = split_emphasis("Led **payments** migration to **Rust**");
        assert_eq!(
            render(&segments),
            vec![
                ("Led ", false),
                ("payments", true),
                (" migration to ", false),
                ("Rust", true),
            ]
        );
    }

    #[test]
    fn test_split_emphasis_drops_empty_segments() {
        let segments = split_emphasis("**bold**");
        assert_eq!(render(&segments), vec![("bold", true)]);
        assert!(split_emphasis("").is_empty());
        assert!(split_emphasis("****").is_empty());
    }

    #[test]
    fn test_split_emphasis_unpaired_delimiter_still_toggles() {
        let segments = split_emphasis("plain **rest");
        assert_eq!(render(&segments), vec![("plain ", false), ("rest", true)]);
    }

    #[test]
    fn test_join_emphasis_restores_markup() {
        let text = "Cut latency by **40%** overall";
        assert_eq!(join_emphasis(&split_emphasis(text)), text);
    }

    #[test]
    fn test_parse_achievement_levels() {
        assert_eq!(parse_achievement("Top").level, 0);
        assert_eq!(parse_achievement(" one space").level, 0);
        assert_eq!(parse_achievement("  two spaces").level, 1);
        assert_eq!(parse_achievement("\tone tab").level, 1);
        assert_eq!(parse_achievement("\t\tdeep").level, 2);
        assert_eq!(parse_achievement("    four").text, "four");
    }

    #[test]
    fn test_parse_achievements_skips_blank_lines() {
        let lines = vec!["First", "   ", "", "  Child **win**"];
        let parsed = parse_achievements(&lines);

        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].text, "First");
        assert_eq!(parsed[1].level, 1);
        assert_eq!(render(&parsed[1].segments), vec![("Child ", false), ("win", true)]);
    }
}
