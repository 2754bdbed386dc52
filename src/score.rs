/*
Span-level scoring of one sentence: reference spans against predicted spans
under a configurable matching mode, feeding both the per-sentence
precision/recall samples (macro averaging) and the per-class
true/false-positive counts (micro averaging).
*/
use crate::spans::EntitySpan;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{self, Display};
use std::str::FromStr;
use tracing::debug;

/// How a predicted span is matched against a reference span. Class labels
/// must be equal in both modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MatchMode {
    /// Surface text must be byte-equal.
    #[default]
    Exact,
    /// The reference text must end with the predicted text,
    /// case-insensitively. Asymmetric: the predicted span may be a suffix of
    /// the reference span, not the other way around.
    Loose,
}

impl Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchMode::Exact => write!(f, "exact"),
            MatchMode::Loose => write!(f, "loose"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchModeParseError(String);

impl Display for MatchModeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "could not parse `{}` into a match mode", self.0)
    }
}

impl Error for MatchModeParseError {}

impl FromStr for MatchMode {
    type Err = MatchModeParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "exact" => Ok(MatchMode::Exact),
            "loose" => Ok(MatchMode::Loose),
            _ => Err(MatchModeParseError(String::from(s))),
        }
    }
}

/// The matching predicate. Returns true when the predicted span counts as a
/// hit for the reference span under the given mode.
pub fn matches(predicted: &EntitySpan, reference: &EntitySpan, mode: MatchMode) -> bool {
    if predicted.class != reference.class {
        return false;
    }
    match mode {
        MatchMode::Exact => predicted.text == reference.text,
        MatchMode::Loose => reference
            .text
            .to_lowercase()
            .ends_with(&predicted.text.to_lowercase()),
    }
}

/// Pooled counts for one class, accumulated over the whole run. Counts only
/// ever grow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassCounts {
    pub true_positive: usize,
    pub false_positive: usize,
    pub false_negative: usize,
}

impl ClassCounts {
    /// Micro precision for this class, `None` when it never predicted
    /// anything (zero denominator).
    pub fn precision(&self) -> Option<f32> {
        ratio(self.true_positive, self.true_positive + self.false_positive)
    }

    /// Micro recall for this class, `None` when there never was a reference
    /// span of it.
    pub fn recall(&self) -> Option<f32> {
        ratio(self.true_positive, self.true_positive + self.false_negative)
    }
}

/// Per-class evaluation accumulator. Entries are created lazily on the first
/// occurrence of a class. Owned by the processing loop; pass it by mutable
/// reference into `score_sentence`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassEval {
    counts: AHashMap<String, ClassCounts>,
}

impl ClassEval {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn get(&self, class: &str) -> Option<&ClassCounts> {
        self.counts.get(class)
    }

    /// Iterates the classes in sorted order, for deterministic reporting.
    pub fn iter_sorted(&self) -> impl Iterator<Item = (&str, &ClassCounts)> {
        let sorted: BTreeMap<&str, &ClassCounts> = self
            .counts
            .iter()
            .map(|(class, counts)| (class.as_str(), counts))
            .collect();
        sorted.into_iter()
    }

    fn counts_mut(&mut self, class: &str) -> &mut ClassCounts {
        self.counts.entry(class.to_owned()).or_default()
    }
}

/// Precision and recall of a single sentence. `None` means undefined: the
/// sentence contributed no sample for that metric. Callers must branch on
/// it, never coerce it to 0 or 1.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SentenceScore {
    pub precision: Option<f32>,
    pub recall: Option<f32>,
}

pub(crate) fn ratio(numerator: usize, denominator: usize) -> Option<f32> {
    if denominator == 0 {
        None
    } else {
        Some(numerator as f32 / denominator as f32)
    }
}

/// Scores one sentence and updates the class accumulator in place.
///
/// * Both span lists empty: nothing is counted, both samples undefined.
/// * Reference spans matched by at least one predicted span count a true
///   positive, unmatched ones a false negative; predicted spans matching no
///   reference span count a false positive. These per-class counts are
///   recorded even when the other side is empty.
/// * The sentence contributes macro samples only when both lists are
///   non-empty; a sentence with an empty side is skipped, not scored as 0.
pub fn score_sentence(
    reference: &[EntitySpan],
    predicted: &[EntitySpan],
    mode: MatchMode,
    classes: &mut ClassEval,
) -> SentenceScore {
    if reference.is_empty() && predicted.is_empty() {
        return SentenceScore::default();
    }
    let mut tp = 0usize;
    let mut fp = 0usize;
    let mut misses = 0usize;
    for reference_span in reference {
        if predicted.iter().any(|p| matches(p, reference_span, mode)) {
            debug!("MATCH\t{}\t{}", reference_span.text, reference_span.class);
            tp += 1;
            classes.counts_mut(&reference_span.class).true_positive += 1;
        } else {
            debug!("MISS\t{}\t{}", reference_span.text, reference_span.class);
            misses += 1;
            classes.counts_mut(&reference_span.class).false_negative += 1;
        }
    }
    for predicted_span in predicted {
        if !reference.iter().any(|r| matches(predicted_span, r, mode)) {
            debug!("WRONG\t{}\t{}", predicted_span.text, predicted_span.class);
            fp += 1;
            classes.counts_mut(&predicted_span.class).false_positive += 1;
        }
    }
    if reference.is_empty() || predicted.is_empty() {
        return SentenceScore::default();
    }
    SentenceScore {
        precision: ratio(tp, tp + fp),
        recall: ratio(tp, tp + misses),
    }
}
