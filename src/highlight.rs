// src/highlight.rs
//! Literal, case-insensitive highlighting of a search term inside raw
//! posting text. Produces structured spans; the renderer decides how a
//! match is emphasized.

use regex::RegexBuilder;

/// One run of text, flagged when it matched the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub is_match: bool,
}

impl Segment {
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            is_match: false,
        }
    }

    fn matched(text: &str) -> Self {
        Self {
            text: text.to_string(),
            is_match: true,
        }
    }
}

/// Split `text` into segments, marking every case-insensitive occurrence of
/// `query` as a match. The query is trimmed first and matched literally, so
/// regex metacharacters in it have no special meaning. An empty or
/// whitespace-only query returns the whole text as a single unmatched
/// segment. Concatenating the segments always reconstructs the input.
pub fn highlight(text: &str, query: &str) -> Vec<Segment> {
    let needle = query.trim();
    if needle.is_empty() {
        if text.is_empty() {
            return Vec::new();
        }
        return vec![Segment::plain(text)];
    }

    // Escaped literals always compile; degrade to no highlighting if one
    // somehow does not.
    let re = match RegexBuilder::new(&regex::escape(needle))
        .case_insensitive(true)
        .build()
    {
        Ok(re) => re,
        Err(_) => return vec![Segment::plain(text)],
    };

    let mut segments = Vec::new();
    let mut last = 0;
    for found in re.find_iter(text) {
        if found.start() > last {
            segments.push(Segment::plain(&text[last..found.start()]));
        }
        segments.push(Segment::matched(found.as_str()));
        last = found.end();
    }
    if last < text.len() {
        segments.push(Segment::plain(&text[last..]));
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joined(segments: &[Segment]) -> String {
        segments.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn test_empty_query_returns_text_unchanged() {
        let segments = highlight("We are hiring", "");
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].text, "We are hiring");
        assert!(!segments[0].is_match);
    }

    #[test]
    fn test_whitespace_query_is_a_no_op() {
        let segments = highlight("We are hiring", "   \t ");
        assert_eq!(segments.len(), 1);
        assert!(!segments[0].is_match);
        assert_eq!(joined(&segments), "We are hiring");
    }

    #[test]
    fn test_empty_text_yields_no_segments() {
        assert!(highlight("", "rust").is_empty());
        assert!(highlight("", "").is_empty());
    }

    #[test]
    fn test_single_occurrence_is_wrapped() {
        let segments = highlight("Senior Rust Engineer", "rust");
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].text, "Senior ");
        assert!(!segments[0].is_match);
        assert_eq!(segments[1].text, "Rust");
        assert!(segments[1].is_match);
        assert_eq!(segments[2].text, " Engineer");
        assert!(!segments[2].is_match);
    }

    #[test]
    fn test_matching_is_case_insensitive_and_global() {
        let segments = highlight("rust, RUST and Rust", "rust");
        let matches: Vec<&str> = segments
            .iter()
            .filter(|s| s.is_match)
            .map(|s| s.text.as_str())
            .collect();
        assert_eq!(matches, vec!["rust", "RUST", "Rust"]);
        assert_eq!(joined(&segments), "rust, RUST and Rust");
    }

    #[test]
    fn test_query_is_matched_literally() {
        // "C++" must not be treated as a pattern.
        let segments = highlight("We use C++ and Cxx here", "C++");
        let matches: Vec<&str> = segments
            .iter()
            .filter(|s| s.is_match)
            .map(|s| s.text.as_str())
            .collect();
        assert_eq!(matches, vec!["C++"]);
        assert_eq!(joined(&segments), "We use C++ and Cxx here");
    }

    #[test]
    fn test_regex_metacharacters_stay_literal() {
        let segments = highlight("a.c abc a.c", "a.c");
        let matches: Vec<&str> = segments
            .iter()
            .filter(|s| s.is_match)
            .map(|s| s.text.as_str())
            .collect();
        assert_eq!(matches, vec!["a.c", "a.c"]);
    }

    #[test]
    fn test_query_is_trimmed_before_matching() {
        let segments = highlight("plain rust text", "  rust ");
        assert!(segments.iter().any(|s| s.is_match && s.text == "rust"));
    }

    #[test]
    fn test_adjacent_occurrences_are_distinct_matches() {
        let segments = highlight("ababab", "ab");
        assert_eq!(segments.len(), 3);
        assert!(segments.iter().all(|s| s.is_match));
        assert_eq!(joined(&segments), "ababab");
    }

    #[test]
    fn test_match_at_start_and_end() {
        let segments = highlight("rust in the middle of rust", "rust");
        assert!(segments.first().map(|s| s.is_match).unwrap_or(false));
        assert!(segments.last().map(|s| s.is_match).unwrap_or(false));
        assert_eq!(joined(&segments), "rust in the middle of rust");
    }

    #[test]
    fn test_whole_text_match() {
        let segments = highlight("rust", "RUST");
        assert_eq!(segments.len(), 1);
        assert!(segments[0].is_match);
    }

    #[test]
    fn test_no_match_keeps_text_intact() {
        let segments = highlight("nothing to see", "rust");
        assert_eq!(segments.len(), 1);
        assert!(!segments[0].is_match);
        assert_eq!(segments[0].text, "nothing to see");
    }

    #[test]
    fn test_no_segment_is_empty() {
        let segments = highlight("rustrust tail", "rust");
        assert!(segments.iter().all(|s| !s.text.is_empty()));
    }
}
