/*
 * Transcript marks may carry inline speech-annotation codes such as `hond*d`
 * or `gewoon*x`. These codes must be removed before chunking, otherwise they
 * end up inside the training tokens.
 */
use enum_iterator::{all, Sequence};
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

/// Inline annotation codes that may follow a `*` inside a transcript mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Sequence)]
pub enum DialectMarker {
    /// `*d`, dialectal speech
    Dialect,
    /// `*u`, other non-standard speech
    Other,
    /// `*v`, foreign language
    Foreign,
    /// `*a`, aborted word
    Aborted,
    /// `*x`, uncertain whether heard correctly
    Uncertain,
}

impl DialectMarker {
    /// The single-letter code following the `*`.
    pub fn code(self) -> char {
        match self {
            DialectMarker::Dialect => 'd',
            DialectMarker::Other => 'u',
            DialectMarker::Foreign => 'v',
            DialectMarker::Aborted => 'a',
            DialectMarker::Uncertain => 'x',
        }
    }
}

static MARKER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    let codes: String = all::<DialectMarker>().map(DialectMarker::code).collect();
    Regex::new(&format!(r"\*[{codes}]\b")).expect("marker pattern is a valid regex")
});

/// Removes every dialect/disfluency marker from a raw transcript mark. All
/// other characters are preserved verbatim; a mark without markers is
/// returned unchanged, without allocating.
pub fn strip_markers(text: &str) -> Cow<'_, str> {
    MARKER_PATTERN.replace_all(text, "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_single_marker() {
        let actual = strip_markers("dat is een hond*d geweest");
        assert_eq!(actual, "dat is een hond geweest");
    }

    #[test]
    fn test_strip_all_marker_codes() {
        let actual = strip_markers("a*d b*u c*v d*a e*x klaar");
        assert_eq!(actual, "a b c d e klaar");
    }

    #[test]
    fn test_marker_requires_word_boundary() {
        // `*dag` is not a marker, the code must end at a word boundary.
        let actual = strip_markers("en toen *dag zei hij");
        assert_eq!(actual, "en toen *dag zei hij");
    }

    #[test]
    fn test_unmarked_text_is_borrowed() {
        let text = "helemaal geen markeringen";
        let actual = strip_markers(text);
        assert!(matches!(actual, Cow::Borrowed(_)));
        assert_eq!(actual, text);
    }

    #[test]
    fn test_marker_inside_bracket_annotation() {
        let actual = strip_markers("hij woont in [Den Haag*d]LOC nu");
        assert_eq!(actual, "hij woont in [Den Haag]LOC nu");
    }
}
