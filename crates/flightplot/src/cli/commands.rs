//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Render command arguments.
#[derive(Debug, Default, Args)]
pub struct RenderCommand {
    /// Path to the flight log file
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Path the chart PNG is written to
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Smoothing window size, in records
    #[arg(short, long)]
    pub window: Option<usize>,

    /// Skip opening the chart in the desktop viewer
    #[arg(long)]
    pub no_show: bool,
}

/// Stats command arguments.
#[derive(Debug, Args)]
pub struct StatsCommand {
    /// Path to the flight log file
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Print the default configuration file path
    Path,

    /// Validate a configuration file
    Validate {
        /// Configuration file to validate (defaults to the standard path)
        file: Option<PathBuf>,
    },
}
