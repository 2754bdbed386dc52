use crate::score::{ClassEval, SentenceScore};
use ndarray::aview1;
use std::fmt::{self, Display};

/// Macro-average accumulator: one precision and one recall sample per
/// sentence that yielded a defined value. Owned by the processing loop.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunAggregate {
    precisions: Vec<f32>,
    recalls: Vec<f32>,
}

impl RunAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the defined values of a sentence score; undefined metrics are
    /// not sampled.
    pub fn add(&mut self, score: SentenceScore) {
        if let Some(precision) = score.precision {
            self.precisions.push(precision);
        }
        if let Some(recall) = score.recall {
            self.recalls.push(recall);
        }
    }

    /// Mean of the precision samples, `None` when no sentence contributed.
    pub fn macro_precision(&self) -> Option<f32> {
        aview1(&self.precisions).mean()
    }

    /// Mean of the recall samples, `None` when no sentence contributed.
    pub fn macro_recall(&self) -> Option<f32> {
        aview1(&self.recalls).mean()
    }

    /// Number of (precision, recall) samples collected so far.
    pub fn samples(&self) -> (usize, usize) {
        (self.precisions.len(), self.recalls.len())
    }
}

/// The final report: overall macro averages followed by per-class micro
/// precision and recall, classes in sorted order. Undefined values print as
/// `n/a` instead of failing.
#[derive(Debug)]
pub struct EvalReport<'a> {
    aggregate: &'a RunAggregate,
    classes: &'a ClassEval,
}

impl<'a> EvalReport<'a> {
    pub fn new(aggregate: &'a RunAggregate, classes: &'a ClassEval) -> Self {
        EvalReport { aggregate, classes }
    }
}

impl Display for EvalReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_metric(f, "overall precision (macroav)", self.aggregate.macro_precision())?;
        write_metric(f, "overall recall (macroav)", self.aggregate.macro_recall())?;
        for (class, counts) in self.classes.iter_sorted() {
            write_metric(f, &format!("{} precision (microav)", class), counts.precision())?;
            write_metric(f, &format!("{} recall (microav)", class), counts.recall())?;
        }
        Ok(())
    }
}

fn write_metric(f: &mut fmt::Formatter<'_>, label: &str, value: Option<f32>) -> fmt::Result {
    match value {
        Some(value) => writeln!(f, "{}:\t{}", label, value),
        None => writeln!(f, "{}:\tn/a", label),
    }
}
