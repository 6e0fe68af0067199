use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use padaln_core::{AlignmentParams, AlignmentStats, GlobalAligner, RenderedAlignment};
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;

mod config;
mod error;

use config::{Config, ScoringOverrides};
use error::{print_error_and_exit, CliError};

#[derive(Parser)]
#[command(name = "padaln")]
#[command(about = "padaln - banded global alignment of nucleotide sequences")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Globally align a target sequence against a query sequence
    Align {
        /// Target sequence (A, C, G, T, N)
        #[arg(short, long)]
        target: String,

        /// Query sequence (A, C, G, T, N)
        #[arg(short, long)]
        query: String,

        /// Configuration file (defaults to ./padaln.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Scoring preset; replaces the [scoring] section of the configuration
        #[arg(short, long, value_enum)]
        preset: Option<Preset>,

        /// Score for a matching pair
        #[arg(long = "match")]
        match_score: Option<i32>,

        /// Penalty for a mismatching pair
        #[arg(long = "mismatch")]
        mismatch_penalty: Option<i32>,

        /// Penalty for opening a gap
        #[arg(long)]
        gap_open: Option<i32>,

        /// Penalty per gap symbol (must be at least 1)
        #[arg(long)]
        gap_extend: Option<i32>,

        /// Maximum deviation from the main diagonal
        #[arg(long)]
        bandwidth: Option<usize>,

        /// Columns per printed block
        #[arg(short, long)]
        width: Option<usize>,

        /// Print a JSON report instead of padded blocks
        #[arg(long)]
        json: bool,
    },

    /// Configuration helpers
    Config {
        /// Print an example padaln.toml
        #[arg(long)]
        example: bool,

        /// Write the default configuration to this file
        #[arg(long, value_name = "PATH")]
        write: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Preset {
    Default,
    IndelTolerant,
}

impl Preset {
    fn params(self) -> AlignmentParams {
        match self {
            Preset::Default => AlignmentParams::default(),
            Preset::IndelTolerant => AlignmentParams::indel_tolerant(),
        }
    }
}

#[derive(Serialize)]
struct AlignmentReport<'a> {
    score: i32,
    cigar: String,
    identity: f64,
    stats: AlignmentStats,
    params: AlignmentParams,
    alignment: &'a RenderedAlignment,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let result = match cli.command {
        Commands::Align {
            target,
            query,
            config,
            preset,
            match_score,
            mismatch_penalty,
            gap_open,
            gap_extend,
            bandwidth,
            width,
            json,
        } => {
            let overrides = ScoringOverrides {
                match_score,
                mismatch_penalty,
                gap_open,
                gap_extend,
                bandwidth,
            };
            cmd_align(&target, &query, config, preset, overrides, width, json)
        }
        Commands::Config { example, write } => cmd_config(example, write),
    };

    if let Err(err) = result {
        match err.downcast_ref::<CliError>() {
            Some(cli_err) => print_error_and_exit(cli_err),
            None => print_error_and_exit(&CliError::io(format!("{:#}", err))),
        }
    }
}

fn cmd_align(
    target: &str,
    query: &str,
    config_path: Option<PathBuf>,
    preset: Option<Preset>,
    overrides: ScoringOverrides,
    width: Option<usize>,
    json: bool,
) -> Result<()> {
    let mut config = Config::load(config_path.as_deref())?;
    if let Some(preset) = preset {
        log::debug!("Using preset {:?}", preset);
        config.scoring = preset.params().into();
    }
    config.scoring.apply(&overrides);
    if let Some(width) = width {
        config.output.column_width = width;
    }

    let params = config.alignment_params();
    log::debug!("Alignment parameters: {:?}", params);

    let aligner = GlobalAligner::new(params).map_err(CliError::from)?;
    let alignment = aligner
        .align(target.as_bytes(), query.as_bytes())
        .map_err(CliError::from)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if json {
        let stats = alignment.stats();
        let report = AlignmentReport {
            score: alignment.score,
            cigar: alignment.cigar(),
            identity: stats.identity(),
            stats,
            params,
            alignment: &alignment.rendered,
        };
        serde_json::to_writer_pretty(&mut out, &report)?;
        writeln!(out)?;
    } else {
        alignment
            .write_report(&mut out, config.output.column_width)
            .map_err(CliError::from)?;
    }

    log::info!(
        "Aligned {} bp target against {} bp query: score {}",
        target.len(),
        query.len(),
        alignment.score
    );
    Ok(())
}

fn cmd_config(example: bool, write: Option<PathBuf>) -> Result<()> {
    if !example && write.is_none() {
        return Err(CliError::config(
            "nothing to do; pass --example to print a sample padaln.toml or --write <PATH> to create one",
        )
        .into());
    }
    if let Some(path) = write {
        Config::default().save_to_file(&path)?;
        log::info!("Wrote default configuration to {}", path.display());
    }
    if example {
        print!("{}", Config::example_toml()?);
    }
    Ok(())
}
