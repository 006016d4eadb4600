//! `fliteplot` - CLI for flightplot
//!
//! This binary reads a line-delimited JSON flight log and renders the
//! four-panel telemetry chart, with subcommands for log summaries and
//! configuration inspection.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use flightplot::cli::{Cli, Command, ConfigCommand, RenderCommand, StatsCommand};
use flightplot::{init_logging, plot, Config, FlightLog};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;

    // Execute the command; a bare invocation renders with defaults
    match cli.command.unwrap_or_default() {
        Command::Render(render_cmd) => handle_render(&config, &render_cmd),
        Command::Stats(stats_cmd) => handle_stats(&config, &stats_cmd),
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
    }
}

fn read_log(config: &Config, input: Option<&PathBuf>) -> anyhow::Result<FlightLog> {
    let path = input.cloned().unwrap_or_else(|| config.input.path.clone());
    FlightLog::from_path(&path).with_context(|| format!("reading flight log {}", path.display()))
}

fn handle_render(config: &Config, cmd: &RenderCommand) -> anyhow::Result<()> {
    let mut plot_config = config.plot.clone();
    if let Some(output) = &cmd.output {
        plot_config.output_path = output.clone();
    }
    if let Some(window) = cmd.window {
        plot_config.window = window;
    }

    let log = read_log(config, cmd.input.as_ref())?;
    let path = plot::render(&log, &plot_config).context("rendering charts")?;
    println!("Wrote {}", path.display());

    if config.viewer.enabled && !cmd.no_show {
        plot::open_in_viewer(&path);
    }
    Ok(())
}

fn handle_stats(config: &Config, cmd: &StatsCommand) -> anyhow::Result<()> {
    let log = read_log(config, cmd.input.as_ref())?;
    let stats = log.stats()?;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("fliteplot stats");
        println!("---------------");
        println!("Records:             {}", stats.records);
        println!("First record:        {}", stats.first_timestamp);
        println!("Last record:         {}", stats.last_timestamp);
        println!("Duration (s):        {:.3}", stats.duration_seconds);
        println!(
            "Altitude range:      {}..{}",
            stats.min_altitude, stats.max_altitude
        );
        println!(
            "Relative altitude:   {}..{}",
            stats.min_relative_altitude, stats.max_relative_altitude
        );
        println!(
            "Speed range:         {:.2}..{:.2}",
            stats.min_speed, stats.max_speed
        );
        println!("Mean speed:          {:.2}", stats.mean_speed);
        println!("Speed alarms:        {}", stats.alarm_count);
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Input]");
                println!("  Log path:       {}", config.input.path.display());
                println!();
                println!("[Plot]");
                println!("  Output path:    {}", config.plot.output_path.display());
                println!("  Window:         {}", config.plot.window);
                println!(
                    "  Canvas:         {}x{}",
                    config.plot.width, config.plot.height
                );
                println!();
                println!("[Viewer]");
                println!("  Enabled:        {}", config.viewer.enabled);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
