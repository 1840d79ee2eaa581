//! Evaluation of alignments against hand-labelled ground truth.

mod benchmark;
mod diff;
mod label;
mod metrics;
mod mistakes;

pub use benchmark::{Benchmark, BenchmarkReport};
pub use diff::{diff_chars, render_inline, DiffOp};
pub use label::{load_labels, AlignmentLabel};
pub use metrics::{normalize_pair, normalize_whitespace, AlignmentResult, AVERAGE_ROW};
pub use mistakes::{Mistake, MistakeReport, NO_LABEL_FOUND};
