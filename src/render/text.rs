//! Plain-text views of aligned documents and benchmark reports.

use std::fmt::Write;

use super::TextOptions;
use crate::eval::BenchmarkReport;
use crate::model::AlignedDocument;

/// Render an aligned document row by row, one line per language.
pub fn to_text(doc: &AlignedDocument, options: &TextOptions) -> String {
    let mut output = String::new();
    let width = doc
        .languages
        .iter()
        .map(|l| l.language.len())
        .max()
        .unwrap_or(0);

    for row in 0..doc.row_count() {
        if options.show_index {
            let _ = writeln!(output, "[{}]", row);
        }
        for set in &doc.languages {
            let Some(paragraph) = set.paragraphs.get(row) else {
                continue;
            };
            let text = if paragraph.is_placeholder() {
                options.placeholder_marker.clone()
            } else {
                options.clip(&paragraph.text)
            };
            let _ = writeln!(output, "  {:<width$}  {}", set.language, text, width = width);
        }
        output.push('\n');
    }

    if options.show_repairs {
        for (language, stats) in &doc.repairs {
            let _ = writeln!(
                output,
                "{}: {} placeholders ({} inserted, {} appended), {} uncorrected, {} truncated",
                language,
                stats.placeholders(),
                stats.inserted,
                stats.appended,
                stats.uncorrected,
                stats.truncated
            );
        }
    }

    output.trim_end().to_string()
}

/// Render a benchmark report as a fixed-width table.
pub fn report_table(report: &BenchmarkReport) -> String {
    let name_width = report
        .rows()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Document".len());

    let mut output = String::new();
    let _ = writeln!(
        output,
        "{:<name_width$}  {:>9}  {:>9}  {:>9}  {:>10}  {:>8}",
        "Document",
        "Precision",
        "Recall",
        "F1",
        "Paragraphs",
        "Seconds",
        name_width = name_width
    );
    for row in report.rows() {
        let _ = writeln!(
            output,
            "{:<name_width$}  {:>9.2}  {:>9.2}  {:>9.2}  {:>10}  {:>8.3}",
            row.name,
            row.precision,
            row.recall,
            row.f1,
            row.paragraph_count,
            row.seconds,
            name_width = name_width
        );
    }
    output.trim_end().to_string()
}
