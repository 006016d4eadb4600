//! Command-line interface for flightplot.
//!
//! This module provides the CLI structure and command handlers for the
//! `fliteplot` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{ConfigCommand, RenderCommand, StatsCommand};

/// fliteplot - Plot flight telemetry logs
///
/// Reads a line-delimited JSON flight log and renders altitude, relative
/// altitude, speed, and speed-alarm charts to a single PNG.
#[derive(Debug, Parser)]
#[command(name = "fliteplot")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute; rendering with defaults when omitted
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Read the flight log and render the charts (the default)
    Render(RenderCommand),

    /// Summarize the flight log
    Stats(StatsCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Default for Command {
    fn default() -> Self {
        Self::Render(RenderCommand::default())
    }
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_verify() {
        // Verify the CLI structure is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "fliteplot");
    }

    #[test]
    fn test_verbosity_quiet() {
        let cli = Cli {
            config: None,
            verbose: 0,
            quiet: true,
            command: None,
        };
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Quiet);
    }

    #[test]
    fn test_verbosity_normal() {
        let cli = Cli {
            config: None,
            verbose: 0,
            quiet: false,
            command: None,
        };
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Normal);
    }

    #[test]
    fn test_verbosity_verbose() {
        let cli = Cli {
            config: None,
            verbose: 1,
            quiet: false,
            command: None,
        };
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Verbose);
    }

    #[test]
    fn test_verbosity_trace() {
        let cli = Cli {
            config: None,
            verbose: 2,
            quiet: false,
            command: None,
        };
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Trace);
    }

    #[test]
    fn test_parse_bare_invocation() {
        let args = vec!["fliteplot"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(cli.command.is_none());
        assert!(matches!(cli.command.unwrap_or_default(), Command::Render(_)));
    }

    #[test]
    fn test_parse_render() {
        let args = vec![
            "fliteplot", "render", "-i", "log.json", "-o", "out.png", "-w", "9", "--no-show",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Some(Command::Render(cmd)) => {
                assert_eq!(cmd.input, Some(PathBuf::from("log.json")));
                assert_eq!(cmd.output, Some(PathBuf::from("out.png")));
                assert_eq!(cmd.window, Some(9));
                assert!(cmd.no_show);
            }
            other => panic!("expected render command, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_stats_json() {
        let args = vec!["fliteplot", "stats", "--json"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Some(Command::Stats(cmd)) => assert!(cmd.json),
            other => panic!("expected stats command, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_config_path() {
        let args = vec!["fliteplot", "config", "path"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Config(ConfigCommand::Path))
        ));
    }

    #[test]
    fn test_parse_with_config() {
        let args = vec!["fliteplot", "-c", "/custom/config.toml", "stats"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_parse_with_verbose() {
        let args = vec!["fliteplot", "-v", "stats"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.verbose, 1);
    }

    #[test]
    fn test_parse_with_quiet() {
        let args = vec!["fliteplot", "-q", "stats"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(cli.quiet);
    }
}
