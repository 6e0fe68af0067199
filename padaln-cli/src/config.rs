//! Configuration handling for the padaln CLI
//!
//! Supports loading configuration from padaln.toml files with CLI argument overrides.

use crate::error::CliError;
use anyhow::{Context, Result};
use padaln_core::{AlignmentParams, DEFAULT_COLUMN_WIDTH};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "padaln.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Score for a matching pair of bases
    #[serde(default = "default_match_score")]
    pub match_score: i32,

    /// Penalty for a mismatching pair
    #[serde(default = "default_mismatch_penalty")]
    pub mismatch_penalty: i32,

    /// Penalty for opening a gap
    #[serde(default = "default_gap_open")]
    pub gap_open: i32,

    /// Penalty per gap symbol
    #[serde(default = "default_gap_extend")]
    pub gap_extend: i32,

    /// Maximum deviation from the main diagonal
    #[serde(default = "default_bandwidth")]
    pub bandwidth: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Columns per printed block
    #[serde(default = "default_column_width")]
    pub column_width: usize,
}

// Default value functions
fn default_match_score() -> i32 { AlignmentParams::default().match_score }
fn default_mismatch_penalty() -> i32 { AlignmentParams::default().mismatch_penalty }
fn default_gap_open() -> i32 { AlignmentParams::default().gap_open }
fn default_gap_extend() -> i32 { AlignmentParams::default().gap_extend }
fn default_bandwidth() -> usize { AlignmentParams::default().bandwidth }
fn default_column_width() -> usize { DEFAULT_COLUMN_WIDTH }

impl Default for ScoringConfig {
    fn default() -> Self {
        AlignmentParams::default().into()
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            column_width: default_column_width(),
        }
    }
}

impl From<AlignmentParams> for ScoringConfig {
    fn from(params: AlignmentParams) -> Self {
        Self {
            match_score: params.match_score,
            mismatch_penalty: params.mismatch_penalty,
            gap_open: params.gap_open,
            gap_extend: params.gap_extend,
            bandwidth: params.bandwidth,
        }
    }
}

impl From<&ScoringConfig> for AlignmentParams {
    fn from(scoring: &ScoringConfig) -> Self {
        Self {
            match_score: scoring.match_score,
            mismatch_penalty: scoring.mismatch_penalty,
            gap_open: scoring.gap_open,
            gap_extend: scoring.gap_extend,
            bandwidth: scoring.bandwidth,
        }
    }
}

/// Per-field overrides taken from the command line
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringOverrides {
    pub match_score: Option<i32>,
    pub mismatch_penalty: Option<i32>,
    pub gap_open: Option<i32>,
    pub gap_extend: Option<i32>,
    pub bandwidth: Option<usize>,
}

impl ScoringConfig {
    pub fn apply(&mut self, overrides: &ScoringOverrides) {
        if let Some(v) = overrides.match_score { self.match_score = v; }
        if let Some(v) = overrides.mismatch_penalty { self.mismatch_penalty = v; }
        if let Some(v) = overrides.gap_open { self.gap_open = v; }
        if let Some(v) = overrides.gap_extend { self.gap_extend = v; }
        if let Some(v) = overrides.bandwidth { self.bandwidth = v; }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::file_not_found(path.to_path_buf()).into());
                }
                log::info!("Loading configuration from: {}", path.display());
                Self::load_from_file(path)?
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    log::info!("Loading configuration from: {}", DEFAULT_CONFIG_FILE);
                    Self::load_from_file(&default_path)?
                } else {
                    log::debug!("Using default configuration");
                    Self::default()
                }
            }
        };

        Ok(config)
    }

    /// Load configuration from a specific TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .map_err(CliError::from)
            .with_context(|| format!("Failed to parse configuration file: {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .context("Failed to serialize configuration")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write configuration file: {}", path.display()))?;

        Ok(())
    }

    /// Generate example configuration file content
    pub fn example_toml() -> Result<String> {
        toml::to_string_pretty(&Self::default()).context("Failed to serialize default configuration")
    }

    pub fn alignment_params(&self) -> AlignmentParams {
        (&self.scoring).into()
    }
}
