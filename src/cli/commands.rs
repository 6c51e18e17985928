//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Convert InfluxQL query responses into data frames
#[derive(Parser, Debug)]
#[command(name = "influxql-frames")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Parser configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse a saved response body into frames
    Parse {
        /// Response body (JSON), or `-` for stdin
        #[arg(short, long)]
        response: PathBuf,

        /// Queries file (YAML or JSON), in submission order
        #[arg(short, long)]
        queries: PathBuf,

        /// Output directory for parquet files
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a queries file
    Validate {
        /// Queries file (YAML or JSON)
        #[arg(short, long)]
        queries: PathBuf,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one line per ref id)
    Json,
    /// Human-readable output
    Pretty,
    /// Parquet files
    Parquet,
}
