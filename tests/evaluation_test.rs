//! Integration tests for the benchmark and evaluation workflow.

use std::fs;
use std::path::Path;

use paralign::eval::{load_labels, AlignmentResult, MistakeReport, NO_LABEL_FOUND};
use paralign::render::{report_table, to_json, JsonFormat};
use paralign::{
    AlignmentLabel, Benchmark, BoundingBox, ParagraphPair, RawSegment, SegmentDocument,
    SegmentType,
};

fn write_segments(dir: &Path, id: &str, language: &str, texts: &[&str]) {
    let segments = texts
        .iter()
        .map(|text| {
            RawSegment::new(
                1,
                BoundingBox::new(72.0, 100.0, 468.0, 24.0),
                (612.0, 792.0),
                *text,
                SegmentType::Text,
            )
        })
        .collect();
    let doc = SegmentDocument::new(language, segments);
    fs::write(
        dir.join(format!("{}.json", id)),
        serde_json::to_string_pretty(&doc).unwrap(),
    )
    .unwrap();
}

fn write_label(dir: &Path, file: &str, label: &AlignmentLabel) {
    fs::write(dir.join(file), serde_json::to_string(label).unwrap()).unwrap();
}

fn label(id: &str, paragraphs: Vec<ParagraphPair>) -> AlignmentLabel {
    AlignmentLabel {
        main_language: "en".to_string(),
        other_language: "fr".to_string(),
        main_document_id: format!("{}_en", id),
        other_document_id: format!("{}_fr", id),
        paragraphs,
    }
}

#[test]
fn test_precision_recall_formula() {
    let truth: Vec<ParagraphPair> = (0..4)
        .map(|i| ParagraphPair::new(format!("p{}", i), format!("q{}", i)))
        .collect();
    let mut predicted: Vec<ParagraphPair> = truth[..3].to_vec();
    predicted.push(ParagraphPair::new("p3", ""));
    predicted.push(ParagraphPair::new("p4", "q4"));
    predicted.push(ParagraphPair::new("p5", "q5"));

    let result = AlignmentResult::evaluate("doc", &predicted, &truth, 0.0);
    // k = 3, |pred| = 6, |truth| = 4
    assert_eq!(result.precision, 50.0);
    assert_eq!(result.recall, 75.0);
    assert_eq!(result.f1, 60.0);

    let disjoint = AlignmentResult::evaluate("doc", &[ParagraphPair::new("x", "y")], &truth, 0.0);
    assert_eq!(disjoint.precision, 0.0);
    assert_eq!(disjoint.recall, 0.0);
    assert_eq!(disjoint.f1, 0.0);
}

#[test]
fn test_benchmark_over_directories() {
    let segments = tempfile::tempdir().unwrap();
    let labels = tempfile::tempdir().unwrap();

    write_segments(
        segments.path(),
        "good_en",
        "en",
        &["Title", "Section 2 of 2022 applies"],
    );
    write_segments(
        segments.path(),
        "good_fr",
        "fr",
        &["Titre", "La section 2 de 2022 s'applique"],
    );
    write_segments(
        segments.path(),
        "bad_en",
        "en",
        &[
            "The committee shall meet at least once every year to review progress",
            "Members may submit written observations within the prescribed time limit",
        ],
    );
    write_segments(
        segments.path(),
        "bad_fr",
        "fr",
        &["Les membres peuvent soumettre des observations écrites dans le délai prescrit"],
    );

    write_label(
        labels.path(),
        "good.json",
        &label(
            "good",
            vec![
                ParagraphPair::new("Title", "Titre"),
                ParagraphPair::new("Section 2 of 2022 applies", "La section 2 de 2022 s'applique"),
            ],
        ),
    );
    write_label(
        labels.path(),
        "bad.json",
        &label(
            "bad",
            vec![
                ParagraphPair::new(
                    "The committee shall meet at least once every year to review progress",
                    "",
                ),
                ParagraphPair::new(
                    "Members may submit written observations within the prescribed time limit",
                    "Les membres peuvent soumettre des observations écrites dans le délai prescrit",
                ),
            ],
        ),
    );

    let labels = load_labels(labels.path()).unwrap();
    assert_eq!(labels.len(), 2);

    let report = Benchmark::new(segments.path())
        .with_mistakes(true)
        .sequential()
        .run(&labels)
        .unwrap();

    // Labels load sorted by file name: bad.json before good.json.
    assert_eq!(report.results[0].name, "bad_en_en_fr");
    assert_eq!(report.results[0].f1, 0.0);
    assert_eq!(report.results[1].f1, 100.0);

    let average = report.average.as_ref().unwrap();
    assert_eq!(average.f1, 50.0);

    let MistakeReport::Mistakes { mistakes } = &report.mistakes["bad_en_en_fr"] else {
        panic!("expected mistakes for the drifted document");
    };
    assert_eq!(mistakes.len(), 2);

    let table = report_table(&report);
    assert!(table.lines().last().unwrap().starts_with("Average"));

    let json = to_json(&report, JsonFormat::Pretty).unwrap();
    assert!(json.contains("\"generated_at\""));
    assert!(json.contains("\"bad_en_en_fr\""));
}

#[test]
fn test_benchmark_without_ground_truth() {
    let segments = tempfile::tempdir().unwrap();
    write_segments(segments.path(), "doc_en", "en", &["Title"]);
    write_segments(segments.path(), "doc_fr", "fr", &["Titre"]);

    let report = Benchmark::new(segments.path())
        .with_mistakes(true)
        .run(&[label("doc", vec![])])
        .unwrap();

    assert_eq!(report.mistakes["doc_en_en_fr"].render(), NO_LABEL_FOUND);
    assert_eq!(report.results[0].precision, 0.0);
}
