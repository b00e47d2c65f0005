//! Config command - inspect or create the config file

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::super::config::Config;
use super::super::output::write_output;

/// Inspect or create the config file
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective config as TOML
    Show,
    /// Print the config file location
    Path,
    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn resolve_path(explicit: Option<&str>) -> Result<PathBuf, String> {
    match explicit {
        Some(p) => Ok(PathBuf::from(p)),
        None => Config::default_path()
            .ok_or_else(|| "No config directory on this platform; pass --config".to_string()),
    }
}

pub fn run(args: ConfigArgs, explicit: Option<&str>) -> Result<(), String> {
    match args.action {
        ConfigAction::Show => {
            let config = Config::load(explicit).map_err(|e| e.to_string())?;
            let content = config.to_toml().map_err(|e| e.to_string())?;
            write_output(&content, None)
        }
        ConfigAction::Path => {
            let path = resolve_path(explicit)?;
            write_output(&format!("{}\n", path.display()), None)
        }
        ConfigAction::Init { force } => {
            let path = resolve_path(explicit)?;
            if path.exists() && !force {
                return Err(format!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                ));
            }
            Config::default()
                .save(&path)
                .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;
            log::info!("wrote default config to {}", path.display());
            write_output(&format!("{}\n", path.display()), None)
        }
    }
}
