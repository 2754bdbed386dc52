/*
This module partitions one transcript fragment into chunks. A chunk is either
a run of plain text or an entity span written in bracket notation:

```text
hij heet [Jan Peters]PER en komt uit [Utrecht]LOC
```

The class label runs from the closing `]` up to the next space. The parser is
a small finite-state machine over the states `Outside`, `InsideSpan` and
`InsideLabel`; nested opening brackets are a structural error that aborts the
remainder of the fragment (chunks already produced stand).
*/
use std::error::Error;
use std::fmt::{self, Display};
use std::str::CharIndices;

/// One parsed chunk of a fragment. `class: None` marks plain text, otherwise
/// the text is an entity span carrying that class label. Both fields borrow
/// from the scanned fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk<'a> {
    pub text: &'a str,
    pub class: Option<&'a str>,
}

/// Malformed bracket structure inside a single fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructuralParseError {
    /// A second `[` was seen before the open span was terminated.
    NestedBrackets,
}

impl Display for StructuralParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructuralParseError::NestedBrackets => write!(f, "nested brackets"),
        }
    }
}

impl Error for StructuralParseError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Accumulating plain text since `start`.
    Outside { start: usize },
    /// Between `[` and `]`; the span text starts at `open`.
    InsideSpan { open: usize },
    /// After the closing `]`; `span` is the byte range between the brackets,
    /// the label accumulates from `label_start` until the next space.
    InsideLabel {
        span: (usize, usize),
        label_start: usize,
    },
}

/// Scans a fragment left to right and yields its chunks in order, with no
/// gaps and no overlaps. The iterator is fused once a structural error has
/// been yielded: the rest of the fragment is abandoned.
#[derive(Debug)]
pub struct Chunker<'a> {
    fragment: &'a str,
    chars: CharIndices<'a>,
    state: State,
    done: bool,
}

impl<'a> Chunker<'a> {
    pub fn new(fragment: &'a str) -> Self {
        let fragment = fragment.trim();
        Chunker {
            fragment,
            chars: fragment.char_indices(),
            state: State::Outside { start: 0 },
            done: false,
        }
    }

    /// Flushes whatever the final state holds once the input is exhausted.
    /// An unterminated `[...` span yields nothing: there is no closed span
    /// to attach a label to.
    fn flush_at_end(&mut self) -> Option<Chunk<'a>> {
        match self.state {
            State::Outside { start } => {
                let text = &self.fragment[start..];
                if text.trim().is_empty() {
                    None
                } else {
                    Some(Chunk { text, class: None })
                }
            }
            State::InsideSpan { .. } => None,
            State::InsideLabel { span, label_start } => Some(Chunk {
                text: &self.fragment[span.0..span.1],
                class: Some(&self.fragment[label_start..]),
            }),
        }
    }
}

impl<'a> Iterator for Chunker<'a> {
    type Item = Result<Chunk<'a>, StructuralParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            let Some((i, c)) = self.chars.next() else {
                self.done = true;
                return self.flush_at_end().map(Ok);
            };
            match self.state {
                State::Outside { start } => {
                    if c == '[' {
                        self.state = State::InsideSpan { open: i + 1 };
                        let text = &self.fragment[start..i];
                        if !text.trim().is_empty() {
                            return Some(Ok(Chunk { text, class: None }));
                        }
                    }
                }
                State::InsideSpan { open } => match c {
                    '[' => {
                        self.done = true;
                        return Some(Err(StructuralParseError::NestedBrackets));
                    }
                    ']' => {
                        self.state = State::InsideLabel {
                            span: (open, i),
                            label_start: i + 1,
                        };
                    }
                    _ => {}
                },
                State::InsideLabel { span, label_start } => match c {
                    '[' => {
                        self.done = true;
                        return Some(Err(StructuralParseError::NestedBrackets));
                    }
                    ' ' => {
                        self.state = State::Outside { start: i + 1 };
                        return Some(Ok(Chunk {
                            text: &self.fragment[span.0..span.1],
                            class: Some(&self.fragment[label_start..i]),
                        }));
                    }
                    _ => {}
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;
    use quickcheck::{Arbitrary, QuickCheck, TestResult};

    fn chunks(fragment: &str) -> Vec<Result<Chunk<'_>, StructuralParseError>> {
        Chunker::new(fragment).collect()
    }

    #[test]
    fn test_mixed_fragment() {
        let actual = chunks("hij heet [Jan Peters]PER en komt uit [Utrecht]LOC");
        let expected = vec![
            Ok(Chunk {
                text: "hij heet ",
                class: None,
            }),
            Ok(Chunk {
                text: "Jan Peters",
                class: Some("PER"),
            }),
            Ok(Chunk {
                text: "en komt uit ",
                class: None,
            }),
            Ok(Chunk {
                text: "Utrecht",
                class: Some("LOC"),
            }),
        ];
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_plain_fragment() {
        let actual = chunks("  helemaal geen entiteiten hier  ");
        assert_eq!(
            actual,
            vec![Ok(Chunk {
                text: "helemaal geen entiteiten hier",
                class: None,
            })]
        );
    }

    #[test]
    fn test_entity_at_fragment_end() {
        let actual = chunks("dat is [Utrecht]LOC");
        assert_eq!(
            actual,
            vec![
                Ok(Chunk {
                    text: "dat is ",
                    class: None,
                }),
                Ok(Chunk {
                    text: "Utrecht",
                    class: Some("LOC"),
                }),
            ]
        );
    }

    #[test]
    fn test_nested_brackets_abandon_fragment() {
        let actual = chunks("[Jan [Peters]PER]PER");
        assert_eq!(actual, vec![Err(StructuralParseError::NestedBrackets)]);
    }

    #[test]
    fn test_nested_brackets_keep_earlier_chunks() {
        let actual = chunks("eerst goed [Jan]PER dan [fout [x]A]B nooit meer");
        assert_eq!(
            actual,
            vec![
                Ok(Chunk {
                    text: "eerst goed ",
                    class: None,
                }),
                Ok(Chunk {
                    text: "Jan",
                    class: Some("PER"),
                }),
                Ok(Chunk {
                    text: "dan ",
                    class: None,
                }),
                Err(StructuralParseError::NestedBrackets),
            ]
        );
    }

    #[test]
    fn test_bracket_during_label_is_nested() {
        let actual = chunks("[Jan]PER[Piet]PER");
        assert_eq!(
            actual,
            vec![Err(StructuralParseError::NestedBrackets)]
        );
    }

    #[test]
    fn test_iterator_fuses_after_error() {
        let mut chunker = Chunker::new("[a [b]X]Y nog [c]Z");
        assert_eq!(
            chunker.next(),
            Some(Err(StructuralParseError::NestedBrackets))
        );
        assert_eq!(chunker.next(), None);
        assert_eq!(chunker.next(), None);
    }

    #[test]
    fn test_empty_label_is_kept() {
        let actual = chunks("[Jan] verder");
        assert_eq!(
            actual,
            vec![
                Ok(Chunk {
                    text: "Jan",
                    class: Some(""),
                }),
                Ok(Chunk {
                    text: "verder",
                    class: None,
                }),
            ]
        );
    }

    #[test]
    fn test_unterminated_span_is_dropped() {
        let actual = chunks("dit blijft [maar dit niet");
        assert_eq!(
            actual,
            vec![Ok(Chunk {
                text: "dit blijft ",
                class: None,
            })]
        );
    }

    #[test]
    fn test_adjacent_entities() {
        let actual = chunks("[Jan]PER [Piet]PER");
        assert_eq!(
            actual,
            vec![
                Ok(Chunk {
                    text: "Jan",
                    class: Some("PER"),
                }),
                Ok(Chunk {
                    text: "Piet",
                    class: Some("PER"),
                }),
            ]
        );
    }

    #[test]
    fn test_whitespace_only_fragment() {
        assert!(chunks("   ").is_empty());
        assert!(chunks("").is_empty());
    }

    #[derive(Debug, Clone, PartialEq)]
    enum Piece {
        Plain(&'static str),
        Entity(&'static str, &'static str),
    }

    impl Piece {
        fn render(&self) -> String {
            match self {
                Piece::Plain(words) => (*words).to_string(),
                Piece::Entity(text, class) => format!("[{}]{}", text, class),
            }
        }
        fn words(&self) -> Vec<&'static str> {
            let text = match self {
                Piece::Plain(words) => words,
                Piece::Entity(text, _) => text,
            };
            text.split_whitespace().collect()
        }
    }

    impl Arbitrary for Piece {
        fn arbitrary(g: &mut quickcheck::Gen) -> Self {
            let plains = ["hij zei", "en toen", "dag", "dat was het wel"];
            let texts = ["Jan", "Jan Peters", "Den Haag", "Utrecht"];
            let classes = ["PER", "LOC", "ORG"];
            if bool::arbitrary(g) {
                Piece::Plain(*g.choose(&plains).unwrap())
            } else {
                Piece::Entity(*g.choose(&texts).unwrap(), *g.choose(&classes).unwrap())
            }
        }
    }

    #[test]
    fn test_propertie_chunks_cover_fragment() {
        fn chunks_cover_fragment(pieces: Vec<Piece>) -> TestResult {
            let fragment = pieces.iter().map(Piece::render).join(" ");
            let parsed: Result<Vec<_>, _> = Chunker::new(&fragment).collect();
            let parsed = match parsed {
                Ok(chunks) => chunks,
                Err(_) => return TestResult::failed(),
            };
            // Chunk texts reconstruct the fragment with markup removed,
            // modulo whitespace.
            let actual_words: Vec<&str> = parsed
                .iter()
                .flat_map(|c| c.text.split_whitespace())
                .collect();
            let expected_words: Vec<&str> =
                pieces.iter().flat_map(|p| p.words()).collect();
            if actual_words != expected_words {
                return TestResult::failed();
            }
            // Every entity piece comes back as an entity chunk, in order.
            let actual_entities: Vec<(&str, &str)> = parsed
                .iter()
                .filter_map(|c| c.class.map(|class| (c.text, class)))
                .collect();
            let expected_entities: Vec<(&str, &str)> = pieces
                .iter()
                .filter_map(|p| match p {
                    Piece::Plain(_) => None,
                    Piece::Entity(text, class) => Some((*text, *class)),
                })
                .collect();
            TestResult::from_bool(actual_entities == expected_entities)
        }
        let mut qc = QuickCheck::new().tests(2000);
        qc.quickcheck(chunks_cover_fragment as fn(Vec<Piece>) -> TestResult)
    }
}
