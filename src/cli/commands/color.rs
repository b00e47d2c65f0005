//! Color command - show the palette entry assigned to labels

use clap::Parser;
use serde::Serialize;

use super::super::config::Config;
use super::super::output::{render_colors, to_json, use_color, write_output};
use super::super::parser::{ColorMode, OutputFormat};

use crate::palette::{chip_style, color_for, color_index, ChipStyle, ColorToken};

/// Show the palette color assigned to labels
#[derive(Parser, Debug)]
pub struct ColorArgs {
    /// Labels to look up
    #[arg(required = true, value_name = "LABEL")]
    pub labels: Vec<String>,

    /// Output format (default from config)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// When to use ANSI colors
    #[arg(long, value_enum)]
    pub color: Option<ColorMode>,
}

#[derive(Serialize)]
struct LabelColor<'a> {
    label: &'a str,
    index: usize,
    token: &'static ColorToken,
    chip: ChipStyle,
}

pub fn run(args: ColorArgs, config: &Config) -> Result<(), String> {
    let output = match args.format.unwrap_or(config.format) {
        OutputFormat::Json => {
            let colors: Vec<LabelColor<'_>> = args
                .labels
                .iter()
                .map(|label| LabelColor {
                    label,
                    index: color_index(label),
                    token: color_for(label),
                    chip: chip_style(label),
                })
                .collect();
            to_json(&colors)?
        }
        OutputFormat::Human => {
            render_colors(&args.labels, use_color(args.color.unwrap_or(config.color)))
        }
        OutputFormat::Inline => render_colors(&args.labels, false),
    };
    write_output(&output, None)
}
