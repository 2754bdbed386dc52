use crate::tags::{Tag, TaggedToken};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// A contiguous entity occurrence: the surface text (tokens joined by one
/// space) and its class label. Reference spans are reconstructed from tagged
/// tokens; predicted spans come from the tagging collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntitySpan {
    pub text: String,
    pub class: String,
}

impl EntitySpan {
    pub fn new(text: impl Into<String>, class: impl Into<String>) -> Self {
        EntitySpan {
            text: text.into(),
            class: class.into(),
        }
    }
}

impl Display for EntitySpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.text, self.class)
    }
}

/// Reconstructs the entity spans of one sentence from its tagged tokens by
/// tracking the currently open span:
///
/// * `B-`class closes any open span and opens a new one.
/// * `I-`class appends its token to the open span, without validating the
///   class; with no span open it opens a new one instead (a stray `I` is
///   treated as a span start rather than dropped).
/// * `O` closes any open span.
///
/// The open span is flushed at the end of the sentence. Output order follows
/// the first token of each span.
pub fn reference_spans(tokens: &[TaggedToken]) -> Vec<EntitySpan> {
    let mut spans = Vec::new();
    let mut open: Option<(Vec<&str>, &str)> = None;
    for tagged in tokens {
        match &tagged.tag {
            Tag::Begin(class) => {
                flush(&mut spans, open.take());
                open = Some((vec![tagged.token.as_str()], class.as_str()));
            }
            Tag::Inside(class) => match open.as_mut() {
                Some((words, _)) => words.push(tagged.token.as_str()),
                None => open = Some((vec![tagged.token.as_str()], class.as_str())),
            },
            Tag::Outside => flush(&mut spans, open.take()),
        }
    }
    flush(&mut spans, open.take());
    spans
}

fn flush(spans: &mut Vec<EntitySpan>, open: Option<(Vec<&str>, &str)>) {
    if let Some((words, class)) = open {
        spans.push(EntitySpan::new(words.iter().join(" "), class));
    }
}
