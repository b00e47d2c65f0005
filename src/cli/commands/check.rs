//! Check command - validate a prediction's entities against its text

use clap::Parser;
use serde::Serialize;

use super::super::config::Config;
use super::super::output::{paint, to_json, use_color, write_output};
use super::super::parser::OutputFormat;
use super::super::utils::{get_input_text, parse_prediction};

use nerview_core::annotation::validate_all;

/// Validate annotation offsets, scores and surfaces
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Read prediction JSON from file (default: stdin)
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<String>,

    /// Only fail on issues that prevent highlighting
    #[arg(long)]
    pub fatal_only: bool,

    /// Output format (default from config)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

#[derive(Serialize)]
struct IssueJson {
    index: usize,
    text: String,
    label: String,
    fatal: bool,
    message: String,
}

pub fn run(args: CheckArgs, config: &Config) -> Result<(), String> {
    let format = args.format.unwrap_or(config.format);
    let prediction = parse_prediction(&get_input_text(args.file.as_deref())?)?;

    let issues: Vec<IssueJson> = validate_all(&prediction.text, &prediction.entities)
        .into_iter()
        .filter(|(_, issue)| !args.fatal_only || issue.is_fatal())
        .map(|(index, issue)| {
            let entity = &prediction.entities[index];
            IssueJson {
                index,
                text: entity.text.clone(),
                label: entity.label.clone(),
                fatal: issue.is_fatal(),
                message: issue.to_string(),
            }
        })
        .collect();

    let output = match format {
        OutputFormat::Json => to_json(&issues)?,
        OutputFormat::Human | OutputFormat::Inline => {
            let colored = format == OutputFormat::Human && use_color(config.color);
            if issues.is_empty() {
                format!(
                    "{} {} entities valid\n",
                    paint("32", "ok", colored),
                    prediction.entities.len()
                )
            } else {
                let mut out = String::new();
                for issue in &issues {
                    let tag = if issue.fatal {
                        paint("1;31", "error", colored)
                    } else {
                        paint("33", "warning", colored)
                    };
                    out.push_str(&format!(
                        "{} #{} '{}' ({}): {}\n",
                        tag, issue.index, issue.text, issue.label, issue.message
                    ));
                }
                out
            }
        }
    };
    write_output(&output, None)?;

    if issues.is_empty() {
        Ok(())
    } else {
        Err(format!(
            "{} issue(s) in {} entities",
            issues.len(),
            prediction.entities.len()
        ))
    }
}
