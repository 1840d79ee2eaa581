//! paralign CLI - cross-lingual paragraph alignment tool

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use paralign::eval::load_labels;
use paralign::render::{report_table, to_json, to_text};
use paralign::{
    Benchmark, JsonFormat, Paralign, PipelineOptions, ScoreWeights, SegmentDocument, SegmentType,
    TextOptions,
};

#[derive(Parser)]
#[command(name = "paralign")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Align paragraphs across language versions of a PDF document", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Align segment documents of one document in several languages
    Align {
        /// Segment document JSON files, one per language
        #[arg(value_name = "FILES", required = true, num_args = 1..)]
        inputs: Vec<PathBuf>,

        /// Main language code (overrides the flags in the files)
        #[arg(short, long, value_name = "LANG")]
        main: Option<String>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Skip malformed segments instead of failing
        #[arg(long)]
        lenient: bool,

        /// Segment types to keep (repeatable)
        #[arg(long = "keep", value_name = "TYPE", num_args = 1..)]
        keep: Vec<SegmentType>,

        /// Score weights JSON file
        #[arg(long, value_name = "FILE")]
        weights: Option<PathBuf>,

        /// Emit scored pairs for every other language instead of the document
        #[arg(long)]
        scores: bool,
    },

    /// Evaluate alignment quality against labelled documents
    Benchmark {
        /// Label file or directory of label files
        #[arg(long, value_name = "DIR")]
        labels: PathBuf,

        /// Directory of segment documents named `<document_id>.json`
        #[arg(long, value_name = "DIR")]
        segments: PathBuf,

        /// Write the JSON report to this file
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Print mistakes per document
        #[arg(long)]
        mistakes: bool,

        /// Process documents one at a time
        #[arg(long)]
        sequential: bool,
    },

    /// Show preparation statistics of a segment document
    Inspect {
        /// Segment document JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Aligned document as JSON
    Json,
    /// Row-by-row plain text
    Text,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Align {
            inputs,
            main,
            output,
            format,
            compact,
            lenient,
            keep,
            weights,
            scores,
        } => cmd_align(
            &inputs,
            AlignArgs {
                main,
                format,
                compact,
                lenient,
                keep,
                weights,
                scores,
            },
            output.as_deref(),
        ),
        Commands::Benchmark {
            labels,
            segments,
            output,
            mistakes,
            sequential,
        } => cmd_benchmark(&labels, &segments, output.as_deref(), mistakes, sequential),
        Commands::Inspect { input, json } => cmd_inspect(&input, json),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

struct AlignArgs {
    main: Option<String>,
    format: OutputFormat,
    compact: bool,
    lenient: bool,
    keep: Vec<SegmentType>,
    weights: Option<PathBuf>,
    scores: bool,
}

fn load_documents(inputs: &[PathBuf]) -> paralign::Result<Vec<SegmentDocument>> {
    inputs.iter().map(SegmentDocument::from_file).collect()
}

fn write_output(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_align(
    inputs: &[PathBuf],
    args: AlignArgs,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let documents = load_documents(inputs)?;

    let mut builder = Paralign::new();
    if args.lenient {
        builder = builder.lenient();
    }
    if !args.keep.is_empty() {
        builder = builder.with_allowed_types(args.keep);
    }
    if let Some(path) = &args.weights {
        builder = builder.with_weights(ScoreWeights::from_file(path)?);
    }
    if let Some(main) = args.main {
        builder = builder.with_main_language(main);
    }

    let alignment = builder.run(&documents)?;
    let totals = alignment.total_stats();
    log::info!(
        "Prepared {} segments into {} paragraphs ({} filtered, {} merged)",
        totals.segment_count,
        totals.paragraph_count,
        totals.filtered_count,
        totals.merged_count
    );
    for (language, stats) in &alignment.document.repairs {
        log::info!(
            "{}: {} placeholders, {} uncorrected, {} truncated",
            language,
            stats.placeholders(),
            stats.uncorrected,
            stats.truncated
        );
    }

    let format = if args.compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let content = if args.scores {
        let main = alignment.document.main_language.clone().unwrap_or_default();
        let mut scored = serde_json::Map::new();
        for language in alignment.document.language_codes() {
            if language != main {
                let pairs = alignment.scored_pairs(language)?;
                scored.insert(language.to_string(), serde_json::to_value(pairs)?);
            }
        }
        to_json(&scored, format)?
    } else {
        match args.format {
            OutputFormat::Json => alignment.to_json(format)?,
            OutputFormat::Text => to_text(
                alignment.document(),
                &TextOptions::new().with_max_width(120).with_repairs(true),
            ),
        }
    };

    write_output(output, &content)
}

fn cmd_benchmark(
    labels: &Path,
    segments: &Path,
    output: Option<&Path>,
    mistakes: bool,
    sequential: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let labels = load_labels(labels)?;
    if labels.is_empty() {
        println!("{}", "No labels found".yellow());
        return Ok(());
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(format!("Aligning {} documents...", labels.len()));

    let mut benchmark = Benchmark::new(segments)
        .with_options(PipelineOptions::new().lenient())
        .with_mistakes(mistakes);
    if sequential {
        benchmark = benchmark.sequential();
    }
    let report = benchmark.run(&labels)?;
    pb.finish_with_message("Done!");

    println!();
    println!("{}", report_table(&report));

    if mistakes {
        for (name, mistake_report) in &report.mistakes {
            println!();
            println!("{}", name.cyan().bold());
            println!("{}", "─".repeat(40).dimmed());
            println!("{}", mistake_report.render());
        }
    }

    if let Some(path) = output {
        fs::write(path, to_json(&report, JsonFormat::Pretty)?)?;
        println!("\n{} {}", "Saved to".green(), path.display());
    }

    Ok(())
}

fn cmd_inspect(input: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let document = SegmentDocument::from_file(input)?;
    let options = PipelineOptions::new().lenient();
    let (set, stats) = paralign::pipeline::prepare_document(&document, &options)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("{}", "Segment Document".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Language".bold(), set.language);
    println!(
        "{}: {}",
        "Main language".bold(),
        if set.is_main_language { "Yes" } else { "No" }
    );

    println!();
    println!("{}", "Preparation Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Segments".bold(), stats.segment_count);
    println!("{}: {}", "Malformed".bold(), stats.malformed_count);
    println!("{}: {}", "Filtered".bold(), stats.filtered_count);
    println!("{}: {}", "Merged".bold(), stats.merged_count);
    println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    println!("{}: {}", "Words".bold(), stats.word_count);

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "paralign".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Cross-lingual paragraph alignment tool");
    println!();
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_align() {
        let cli = Cli::try_parse_from([
            "paralign",
            "align",
            "en.json",
            "fr.json",
            "--main",
            "en",
            "--keep",
            "TEXT",
            "list item",
            "--format",
            "text",
        ])
        .unwrap();

        let Commands::Align {
            inputs, main, keep, format, ..
        } = cli.command
        else {
            panic!("expected align command");
        };
        assert_eq!(inputs.len(), 2);
        assert_eq!(main.as_deref(), Some("en"));
        assert_eq!(keep, vec![SegmentType::Text, SegmentType::ListItem]);
        assert!(format == OutputFormat::Text);
    }

    #[test]
    fn test_cli_rejects_unknown_type() {
        let result = Cli::try_parse_from(["paralign", "align", "en.json", "--keep", "banner"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_documents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("en.json");
        fs::write(&path, r#"{"language": "en", "segments": []}"#).unwrap();

        let documents = load_documents(&[path]).unwrap();
        assert_eq!(documents[0].language, "en");
        assert!(load_documents(&[dir.path().join("missing.json")]).is_err());
    }
}
