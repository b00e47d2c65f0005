//! Config file handling.
//!
//! ```toml
//! # <config dir>/nerview/config.toml
//! min_score = 0.5      # hide entities scored below this
//! show_scores = true   # print percentages next to entities
//! color = "auto"       # auto | always | never
//! format = "human"     # human | json | inline
//! ```
//!
//! Command-line flags override file values.

use std::fs;
use std::path::{Path, PathBuf};

use nerview_core::{Error, Result};
use serde::{Deserialize, Serialize};

use super::parser::{ColorMode, OutputFormat};

/// Config file name inside the nerview config directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Persisted CLI defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Drop entities scored below this value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_score: Option<f64>,
    /// Print scores in human output.
    pub show_scores: bool,
    /// ANSI color mode.
    pub color: ColorMode,
    /// Default output format.
    pub format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_score: None,
            show_scores: true,
            color: ColorMode::Auto,
            format: OutputFormat::Human,
        }
    }
}

impl Config {
    /// `<config dir>/nerview/config.toml`, if the platform has a config dir.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut dir| {
            dir.push("nerview");
            dir.push(CONFIG_FILE);
            dir
        })
    }

    /// Load from an explicit path, or the default path if it exists.
    ///
    /// A missing default file yields the default config; a missing
    /// explicit file is an error.
    pub fn load(path: Option<&str>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(Path::new(p)),
            None => match Self::default_path() {
                Some(p) if p.exists() => Self::from_file(&p),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Read and parse a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        log::debug!("loading config from {}", path.display());
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content).map_err(|e| match e {
            Error::Config(msg) => Error::config(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    /// Parse and validate TOML.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| Error::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Write as TOML, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Reject values outside their domain.
    pub fn validate(&self) -> Result<()> {
        if let Some(min) = self.min_score {
            if !(0.0..=1.0).contains(&min) {
                return Err(Error::config(format!("min_score {} outside [0.0, 1.0]", min)));
            }
        }
        Ok(())
    }

    /// Apply command-line overrides.
    #[must_use]
    pub fn with_overrides(
        mut self,
        min_score: Option<f64>,
        color: Option<ColorMode>,
        format: Option<OutputFormat>,
        hide_scores: bool,
    ) -> Self {
        if min_score.is_some() {
            self.min_score = min_score;
        }
        if let Some(color) = color {
            self.color = color;
        }
        if let Some(format) = format {
            self.format = format;
        }
        if hide_scores {
            self.show_scores = false;
        }
        self
    }
}
