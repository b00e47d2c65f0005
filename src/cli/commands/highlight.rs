//! Highlight command - render a prediction with its entities marked

use clap::Parser;
use serde::Serialize;

use super::super::config::Config;
use super::super::output::{render_highlight, render_inline, to_json, use_color, write_output};
use super::super::parser::{ColorMode, OutputFormat};
use super::super::utils::load_prediction;

use crate::aggregate::{filter_by_score, summarize, LabelSummary};
use crate::locate::resolve;
use crate::merge::{merge_with_report, MergedSpan, Segment};
use nerview_core::Error;

/// Render a prediction with entities highlighted
#[derive(Parser, Debug)]
pub struct HighlightArgs {
    /// Read prediction JSON from file (default: stdin)
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<String>,

    /// Source text (use with --entities instead of a prediction document)
    #[arg(short, long, conflicts_with = "file")]
    pub text: Option<String>,

    /// Entity array JSON for --text
    #[arg(short, long, value_name = "JSON", requires = "text")]
    pub entities: Option<String>,

    /// Output format (default from config)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Drop entities scored below this value
    #[arg(long, value_name = "SCORE")]
    pub min_score: Option<f64>,

    /// Assign offsets to entities that only carry surface text
    #[arg(long)]
    pub locate: bool,

    /// Hide scores in human output
    #[arg(long)]
    pub no_scores: bool,

    /// When to use ANSI colors
    #[arg(long, value_enum)]
    pub color: Option<ColorMode>,

    /// Write output to file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<String>,
}

#[derive(Serialize)]
struct HighlightJson<'a> {
    text: &'a str,
    segments: &'a [Segment],
    summary: &'a LabelSummary,
    skipped: &'a [MergedSpan],
}

pub fn run(args: HighlightArgs, config: &Config) -> Result<(), String> {
    let config = config.clone().with_overrides(
        args.min_score,
        args.color,
        args.format,
        args.no_scores,
    );
    config.validate().map_err(|e| e.to_string())?;

    let mut prediction = load_prediction(
        args.file.as_deref(),
        args.text.as_deref(),
        args.entities.as_deref(),
    )?;
    if let Some(min) = config.min_score {
        let before = prediction.entities.len();
        prediction.entities = filter_by_score(&prediction.entities, min);
        log::debug!(
            "min score {} kept {} of {} entities",
            min,
            prediction.entities.len(),
            before
        );
    }

    let annotations = if args.locate {
        resolve(&prediction.text, &prediction.entities)
    } else {
        prediction.annotations()
    }
    .map_err(describe_failure)?;

    let outcome = merge_with_report(&prediction.text, &annotations)
        .map_err(|e| format!("Merge failed: {}", e))?;
    let summary = summarize(&annotations);

    let output = match config.format {
        OutputFormat::Human => {
            render_highlight(&outcome, &summary, config.show_scores, use_color(config.color))
        }
        OutputFormat::Inline => render_inline(&outcome.segments, false) + "\n",
        OutputFormat::Json => to_json(&HighlightJson {
            text: &prediction.text,
            segments: &outcome.segments,
            summary: &summary,
            skipped: &outcome.skipped,
        })?,
    };

    write_output(&output, args.output.as_deref())
}

fn describe_failure(err: Error) -> String {
    let hint = if matches!(err, Error::MissingOffsets { .. }) {
        " (use --locate for text-only entities)"
    } else {
        ""
    };
    format!("Invalid entities: {}{}", err, hint)
}
