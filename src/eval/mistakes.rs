//! Mistake reports: wrong predictions next to their closest ground truth.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::diff::{diff_chars, render_inline, DiffOp};
use super::metrics::normalize_pair;
use crate::model::ParagraphPair;
use crate::scoring::fuzzy_ratio;

/// Report line emitted for a document without ground truth.
pub const NO_LABEL_FOUND: &str = "No label found";

/// A predicted pair that is not in the ground truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mistake {
    /// The wrong prediction
    pub predicted: ParagraphPair,

    /// Most similar ground-truth pair
    pub closest_truth: ParagraphPair,

    /// Fuzzy similarity between the two, in `[0, 1]`
    pub similarity: f64,

    /// Diff of the other-language text, truth to prediction
    pub diff: Vec<DiffOp>,
}

impl Mistake {
    /// Render the mistake as a short human-readable block.
    pub fn render(&self) -> String {
        format!(
            "main:     {}\npredicted: {}\nexpected:  {}\ndiff:      {}",
            self.predicted.main_language_text,
            self.predicted.other_language_text,
            self.closest_truth.other_language_text,
            render_inline(&self.diff)
        )
    }
}

/// Mistakes of one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MistakeReport {
    /// The document has no ground truth
    NoLabel,
    /// Unmatched predictions, in prediction order
    Mistakes { mistakes: Vec<Mistake> },
}

impl MistakeReport {
    /// Compare predictions with the ground truth.
    pub fn collect(predicted: &[ParagraphPair], truth: &[ParagraphPair]) -> Self {
        if truth.is_empty() {
            return MistakeReport::NoLabel;
        }

        let truth: Vec<ParagraphPair> = truth.iter().map(normalize_pair).collect();
        let known: HashSet<&ParagraphPair> = truth.iter().collect();

        let mistakes = predicted
            .iter()
            .map(normalize_pair)
            .filter(|pair| !known.contains(pair))
            .filter_map(|pair| closest(pair, &truth))
            .collect();

        MistakeReport::Mistakes { mistakes }
    }

    /// Number of mistakes, zero without ground truth.
    pub fn len(&self) -> usize {
        match self {
            MistakeReport::NoLabel => 0,
            MistakeReport::Mistakes { mistakes } => mistakes.len(),
        }
    }

    /// Check if there is nothing to report.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Render the whole report.
    pub fn render(&self) -> String {
        match self {
            MistakeReport::NoLabel => NO_LABEL_FOUND.to_string(),
            MistakeReport::Mistakes { mistakes } => mistakes
                .iter()
                .map(Mistake::render)
                .collect::<Vec<_>>()
                .join("\n\n"),
        }
    }
}

fn closest(predicted: ParagraphPair, truth: &[ParagraphPair]) -> Option<Mistake> {
    let key = pair_key(&predicted);
    let (best, similarity) = truth
        .iter()
        .map(|candidate| (candidate, fuzzy_ratio(&key, &pair_key(candidate))))
        .fold(None, |best: Option<(&ParagraphPair, f64)>, current| match best {
            Some(b) if b.1 >= current.1 => Some(b),
            _ => Some(current),
        })?;

    Some(Mistake {
        diff: diff_chars(&best.other_language_text, &predicted.other_language_text),
        closest_truth: best.clone(),
        predicted,
        similarity,
    })
}

fn pair_key(pair: &ParagraphPair) -> String {
    format!("{} {}", pair.main_language_text, pair.other_language_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(main: &str, other: &str) -> ParagraphPair {
        ParagraphPair::new(main, other)
    }

    #[test]
    fn test_no_label() {
        let report = MistakeReport::collect(&[pair("A", "a")], &[]);
        assert_eq!(report, MistakeReport::NoLabel);
        assert_eq!(report.render(), "No label found");
        assert!(report.is_empty());
    }

    #[test]
    fn test_no_mistakes() {
        let truth = vec![pair("Title", "Titre")];
        let report = MistakeReport::collect(&[pair("Title ", "Titre")], &truth);
        assert!(report.is_empty());
        assert_eq!(report.render(), "");
    }

    #[test]
    fn test_mistake_paired_with_closest_truth() {
        let truth = vec![
            pair("Scope of the treaty", "Champ d'application du traité"),
            pair("Entry into force", "Entrée en vigueur"),
        ];
        let predicted = vec![
            pair("Scope of the treaty", "Champ d'application du traité"),
            pair("Entry into force", ""),
        ];

        let report = MistakeReport::collect(&predicted, &truth);
        let MistakeReport::Mistakes { mistakes } = &report else {
            panic!("expected mistakes");
        };
        assert_eq!(mistakes.len(), 1);
        assert_eq!(mistakes[0].closest_truth, truth[1]);
        assert_eq!(
            mistakes[0].diff,
            vec![DiffOp::Delete {
                text: "Entrée en vigueur".into()
            }]
        );
        assert!(report.render().contains("[-Entrée en vigueur-]"));
    }
}
