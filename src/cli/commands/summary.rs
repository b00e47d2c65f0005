//! Summary command - label counts for a prediction or an experiment run

use clap::Parser;
use serde::Serialize;

use super::super::config::Config;
use super::super::output::{render_legend, render_run, to_json, use_color, write_output};
use super::super::parser::{ColorMode, OutputFormat};
use super::super::utils::{get_input_text, parse_prediction, parse_run_results};

use crate::aggregate::{aggregate_run, filter_by_score, summarize, LabelSummary, RunSummary};

/// Count entity labels in a prediction or experiment run
#[derive(Parser, Debug)]
pub struct SummaryArgs {
    /// Read JSON from file (default: stdin)
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<String>,

    /// Input is experiment run results rather than a single prediction
    #[arg(long)]
    pub run: bool,

    /// Show only the N most frequent labels
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,

    /// Drop entities scored below this value
    #[arg(long, value_name = "SCORE")]
    pub min_score: Option<f64>,

    /// Output format (default from config)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// When to use ANSI colors
    #[arg(long, value_enum)]
    pub color: Option<ColorMode>,
}

#[derive(Serialize)]
struct SummaryJson<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    run: Option<RunSummary>,
    labels: &'a LabelSummary,
}

pub fn run(args: SummaryArgs, config: &Config) -> Result<(), String> {
    let config = config
        .clone()
        .with_overrides(args.min_score, args.color, args.format, false);
    config.validate().map_err(|e| e.to_string())?;
    let colored = use_color(config.color);
    let input = get_input_text(args.file.as_deref())?;

    let output = if args.run {
        let results = parse_run_results(&input)?;
        let mut entities = aggregate_run(&results);
        if let Some(min) = config.min_score {
            entities = filter_by_score(&entities, min);
        }
        log::debug!(
            "aggregated {} entities from {} documents",
            entities.len(),
            results.len()
        );
        let labels = summarize(&entities);
        match config.format {
            OutputFormat::Json => to_json(&SummaryJson {
                run: Some(RunSummary::from_entities(&entities)),
                labels: &labels,
            })?,
            OutputFormat::Human => render_run(&entities, &labels, args.top, colored),
            OutputFormat::Inline => render_run(&entities, &labels, args.top, false),
        }
    } else {
        let prediction = parse_prediction(&input)?;
        let mut entities = prediction.entities;
        if let Some(min) = config.min_score {
            entities = filter_by_score(&entities, min);
        }
        let labels = summarize(&entities);
        match config.format {
            OutputFormat::Json => to_json(&SummaryJson {
                run: None,
                labels: &labels,
            })?,
            _ if labels.is_empty() => "No entities found.\n".to_string(),
            OutputFormat::Human => render_legend(&labels, args.top, colored),
            OutputFormat::Inline => render_legend(&labels, args.top, false),
        }
    };

    write_output(&output, None)
}
