//! Precision, recall and F1 over aligned paragraph pairs.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::model::ParagraphPair;

/// Name of the aggregate row in a report.
pub const AVERAGE_ROW: &str = "Average";

/// Evaluation result of one document, or the average over documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentResult {
    /// Document name, or [`AVERAGE_ROW`]
    pub name: String,

    /// Precision in percent
    pub precision: f64,

    /// Recall in percent
    pub recall: f64,

    /// F1 in percent
    pub f1: f64,

    /// Number of aligned rows predicted
    pub paragraph_count: usize,

    /// Wall-clock preparation and alignment time
    pub seconds: f64,
}

impl AlignmentResult {
    /// Evaluate predicted pairs against the ground truth.
    pub fn evaluate(
        name: impl Into<String>,
        predicted: &[ParagraphPair],
        truth: &[ParagraphPair],
        seconds: f64,
    ) -> Self {
        let predicted_set = normalized_set(predicted);
        let truth_set = normalized_set(truth);
        let correct = predicted_set.intersection(&truth_set).count() as f64;

        let precision = ratio(correct, predicted_set.len());
        let recall = ratio(correct, truth_set.len());
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };

        Self {
            name: name.into(),
            precision: percent(precision),
            recall: percent(recall),
            f1: percent(f1),
            paragraph_count: predicted.len(),
            seconds,
        }
    }

    /// Arithmetic mean over results, named [`AVERAGE_ROW`].
    ///
    /// Returns `None` for an empty slice.
    pub fn average(results: &[AlignmentResult]) -> Option<Self> {
        if results.is_empty() {
            return None;
        }

        let n = results.len() as f64;
        let mean = |f: fn(&AlignmentResult) -> f64| results.iter().map(f).sum::<f64>() / n;
        let paragraphs: usize = results.iter().map(|r| r.paragraph_count).sum();

        Some(Self {
            name: AVERAGE_ROW.to_string(),
            precision: round2(mean(|r| r.precision)),
            recall: round2(mean(|r| r.recall)),
            f1: round2(mean(|r| r.f1)),
            paragraph_count: (paragraphs as f64 / n).round() as usize,
            seconds: mean(|r| r.seconds),
        })
    }
}

/// Collapse whitespace runs so layout differences do not count as errors.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// A pair with both texts whitespace-normalized.
pub fn normalize_pair(pair: &ParagraphPair) -> ParagraphPair {
    ParagraphPair::new(
        normalize_whitespace(&pair.main_language_text),
        normalize_whitespace(&pair.other_language_text),
    )
}

fn normalized_set(pairs: &[ParagraphPair]) -> HashSet<ParagraphPair> {
    pairs.iter().map(normalize_pair).collect()
}

fn ratio(correct: f64, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        correct / total as f64
    }
}

fn percent(value: f64) -> f64 {
    round2(value * 100.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(main: &str, other: &str) -> ParagraphPair {
        ParagraphPair::new(main, other)
    }

    #[test]
    fn test_perfect_alignment() {
        let truth = vec![pair("A", "a"), pair("B", "b")];
        let result = AlignmentResult::evaluate("doc", &truth, &truth, 0.5);
        assert_eq!(result.precision, 100.0);
        assert_eq!(result.recall, 100.0);
        assert_eq!(result.f1, 100.0);
        assert_eq!(result.paragraph_count, 2);
    }

    #[test]
    fn test_partial_alignment() {
        let predicted = vec![pair("A", "a"), pair("B", ""), pair("C", "c")];
        let truth = vec![pair("A", "a"), pair("B", "b")];
        let result = AlignmentResult::evaluate("doc", &predicted, &truth, 0.0);
        assert_eq!(result.precision, 33.33);
        assert_eq!(result.recall, 50.0);
        assert_eq!(result.f1, 40.0);
    }

    #[test]
    fn test_whitespace_is_normalized() {
        let predicted = vec![pair("Hello  world", "Bonjour\nle monde")];
        let truth = vec![pair("Hello world", "Bonjour le monde ")];
        let result = AlignmentResult::evaluate("doc", &predicted, &truth, 0.0);
        assert_eq!(result.f1, 100.0);
    }

    #[test]
    fn test_empty_sets() {
        let truth = vec![pair("A", "a")];
        let no_prediction = AlignmentResult::evaluate("doc", &[], &truth, 0.0);
        assert_eq!(no_prediction.precision, 0.0);
        assert_eq!(no_prediction.f1, 0.0);

        let no_truth = AlignmentResult::evaluate("doc", &truth, &[], 0.0);
        assert_eq!(no_truth.recall, 0.0);
        assert_eq!(no_truth.f1, 0.0);
    }

    #[test]
    fn test_average() {
        let results = vec![
            AlignmentResult::evaluate("a", &[pair("A", "a")], &[pair("A", "a")], 1.0),
            AlignmentResult::evaluate("b", &[pair("A", "x")], &[pair("A", "a")], 3.0),
        ];
        let average = AlignmentResult::average(&results).unwrap();
        assert_eq!(average.name, AVERAGE_ROW);
        assert_eq!(average.precision, 50.0);
        assert_eq!(average.recall, 50.0);
        assert_eq!(average.f1, 50.0);
        assert_eq!(average.seconds, 2.0);
        assert!(AlignmentResult::average(&[]).is_none());
    }
}
