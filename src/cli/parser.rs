//! CLI argument parsing and structure definitions

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use super::commands;

/// NER result viewer - highlight entities, summarize labels
#[derive(Parser)]
#[command(name = "nerview")]
#[command(
    author,
    version,
    about = "NER result viewer - highlight entities, summarize labels",
    long_about = r#"
nerview - render named-entity predictions in the terminal

INPUT:
  Prediction JSON as returned by the NER service:
    {"text": "...", "entities": [{"text", "label", "start", "end", "score"}]}
  Experiment run results (summary --run):
    {"results": [{"document_id", "document_title", "predictions": [...]}]}

  Offsets are zero-based, half-open and counted in characters.

EXAMPLES:
  nerview highlight -f prediction.json
  curl -s .../predict_entities | nerview highlight --format inline
  nerview summary --run -f run_42.json
  nerview check -f prediction.json
  nerview color PERSON LOCATION
"#
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: <config dir>/nerview/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a prediction with entities highlighted
    #[command(visible_alias = "h")]
    Highlight(commands::HighlightArgs),

    /// Count entity labels in a prediction or experiment run
    #[command(visible_alias = "s")]
    Summary(commands::SummaryArgs),

    /// Validate annotation offsets, scores and surfaces
    #[command(visible_alias = "c")]
    Check(commands::CheckArgs),

    /// Show the palette color assigned to labels
    Color(commands::ColorArgs),

    /// Inspect or create the config file
    Config(commands::ConfigArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Output format selection for all commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output (default)
    #[default]
    Human,
    /// JSON document
    Json,
    /// Inline `[LABEL: text]` annotations, no color
    Inline,
}

/// When to emit ANSI colors
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Color when stdout is a terminal
    #[default]
    Auto,
    /// Always color
    Always,
    /// Never color
    Never,
}
