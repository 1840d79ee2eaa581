//! End-to-end alignment benchmark over labelled documents.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::label::AlignmentLabel;
use super::metrics::AlignmentResult;
use super::mistakes::MistakeReport;
use crate::align::SequenceAligner;
use crate::error::{Error, Result};
use crate::model::{ParagraphPair, SegmentDocument};
use crate::pipeline::{prepare_document, PipelineOptions};

/// Benchmark outcome for a set of labels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkReport {
    /// When the report was produced
    pub generated_at: DateTime<Utc>,

    /// One row per label, in label order
    pub results: Vec<AlignmentResult>,

    /// Mean over all rows, absent when there are none
    pub average: Option<AlignmentResult>,

    /// Mistakes per label name, when requested
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub mistakes: BTreeMap<String, MistakeReport>,
}

impl BenchmarkReport {
    /// Rows including the trailing average row.
    pub fn rows(&self) -> impl Iterator<Item = &AlignmentResult> {
        self.results.iter().chain(self.average.as_ref())
    }
}

/// Runs preparation, alignment and evaluation for labelled documents.
///
/// Segment documents are looked up as `<segments_dir>/<document_id>.json`.
#[derive(Debug, Clone)]
pub struct Benchmark {
    segments_dir: PathBuf,
    options: PipelineOptions,
    collect_mistakes: bool,
    parallel: bool,
}

impl Benchmark {
    /// Create a benchmark reading segment documents from `segments_dir`.
    pub fn new(segments_dir: impl Into<PathBuf>) -> Self {
        Self {
            segments_dir: segments_dir.into(),
            options: PipelineOptions::default(),
            collect_mistakes: false,
            parallel: true,
        }
    }

    /// Set the preparation options.
    pub fn with_options(mut self, options: PipelineOptions) -> Self {
        self.options = options;
        self
    }

    /// Collect mistake reports alongside the metrics.
    pub fn with_mistakes(mut self, collect: bool) -> Self {
        self.collect_mistakes = collect;
        self
    }

    /// Process documents one at a time.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self.options = self.options.sequential();
        self
    }

    /// Evaluate every label and build the report.
    pub fn run(&self, labels: &[AlignmentLabel]) -> Result<BenchmarkReport> {
        let outcomes: Vec<(AlignmentResult, MistakeReport)> = if self.parallel {
            labels.par_iter().map(|l| self.run_label(l)).collect::<Result<_>>()?
        } else {
            labels.iter().map(|l| self.run_label(l)).collect::<Result<_>>()?
        };

        let mut results = Vec::with_capacity(outcomes.len());
        let mut mistakes = BTreeMap::new();
        for (result, report) in outcomes {
            if self.collect_mistakes {
                mistakes.insert(result.name.clone(), report);
            }
            results.push(result);
        }
        let average = AlignmentResult::average(&results);

        log::info!("Benchmarked {} documents", results.len());
        Ok(BenchmarkReport {
            generated_at: Utc::now(),
            results,
            average,
            mistakes,
        })
    }

    /// Align and evaluate a single label.
    pub fn run_label(&self, label: &AlignmentLabel) -> Result<(AlignmentResult, MistakeReport)> {
        if label.main_language == label.other_language {
            return Err(Error::Benchmark(format!(
                "{}: main and other language are both {}",
                label.name(),
                label.main_language
            )));
        }

        let mut main = self.load(&label.main_document_id)?;
        main.language = label.main_language.clone();
        main.is_main_language = true;

        let mut other = self.load(&label.other_document_id)?;
        other.language = label.other_language.clone();
        other.is_main_language = false;

        let start = Instant::now();
        let predicted = self.predict(&main, &other, &label.other_language)?;
        let seconds = start.elapsed().as_secs_f64();

        let result = AlignmentResult::evaluate(label.name(), &predicted, &label.paragraphs, seconds);
        log::debug!(
            "{}: precision {:.2}, recall {:.2}, f1 {:.2} in {:.3}s",
            result.name,
            result.precision,
            result.recall,
            result.f1,
            seconds
        );

        let report = if self.collect_mistakes {
            MistakeReport::collect(&predicted, &label.paragraphs)
        } else {
            MistakeReport::Mistakes {
                mistakes: Vec::new(),
            }
        };
        Ok((result, report))
    }

    fn predict(
        &self,
        main: &SegmentDocument,
        other: &SegmentDocument,
        other_language: &str,
    ) -> Result<Vec<ParagraphPair>> {
        let (main_set, _) = prepare_document(main, &self.options)?;
        let (other_set, _) = prepare_document(other, &self.options)?;

        let aligner = SequenceAligner::new().with_parallel(self.options.parallel);
        aligner.align(vec![main_set, other_set]).pairs(other_language)
    }

    fn load(&self, document_id: &str) -> Result<SegmentDocument> {
        let path = document_path(&self.segments_dir, document_id);
        if !path.is_file() {
            return Err(Error::DocumentNotFound(path.display().to_string()));
        }
        SegmentDocument::from_file(&path)
            .map_err(|e| Error::Benchmark(format!("{}: {}", path.display(), e)))
    }
}

fn document_path(dir: &Path, document_id: &str) -> PathBuf {
    dir.join(format!("{}.json", document_id))
}
