//! nerview - terminal viewer for NER predictions
//!
//! # Usage
//!
//! ```bash
//! # Highlight a saved prediction
//! nerview highlight -f prediction.json
//!
//! # Pipe straight from the NER service
//! curl -s "$API/predict_entities" -d '{"text": "..."}' | nerview highlight
//!
//! # Label counts across an experiment run
//! nerview summary --run -f run_42.json --top 10
//!
//! # Which color does a label get?
//! nerview color PERSON LOCATION
//! ```

use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;

use nerview::cli::output::color;
use nerview::cli::{self, Cli};

fn init_logging(verbose: u8) {
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn"),
    );
    match verbose {
        0 => {}
        1 => {
            builder.filter_level(LevelFilter::Debug);
        }
        _ => {
            builder.filter_level(LevelFilter::Trace);
        }
    }
    builder.format_timestamp(None).init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", color("31", "error:"), e);
            ExitCode::FAILURE
        }
    }
}
