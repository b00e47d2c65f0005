//! CLI library modules for the nerview binary.

pub mod commands;
pub mod config;
pub mod output;
pub mod parser;
pub mod utils;

pub use config::Config;
pub use parser::{Cli, ColorMode, Commands, OutputFormat};

/// Run a parsed command line.
pub fn run(cli: Cli) -> Result<(), String> {
    let path = cli.config.as_deref();
    let load = || Config::load(path).map_err(|e| e.to_string());

    match cli.command {
        Commands::Highlight(args) => commands::highlight::run(args, &load()?),
        Commands::Summary(args) => commands::summary::run(args, &load()?),
        Commands::Check(args) => commands::check::run(args, &load()?),
        Commands::Color(args) => commands::color::run(args, &load()?),
        Commands::Config(args) => commands::config::run(args, path),
        Commands::Completions { shell } => {
            use clap::CommandFactory;
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "nerview", &mut std::io::stdout());
            Ok(())
        }
    }
}
