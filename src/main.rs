// Main entry point for testlog

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tracing::info;

use testlog::cli::{Cli, Commands};
use testlog::commands;
use testlog::config::{self, Config};
use testlog::logging;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if cli.verbose {
        info!("Starting testlog v{}", env!("CARGO_PKG_VERSION"));
    }

    if let Some(shell) = &cli.completion {
        return commands::handle_completion(shell);
    }

    let loaded = Config::load();

    if cli.config {
        print_config(loaded.as_ref());
        return Ok(());
    }

    if let Some(config_file) = &cli.init_config {
        std::fs::write(config_file, Config::default().to_toml()).with_context(|| {
            format!("Failed to write configuration: {}", config_file.display())
        })?;
        println!("Configuration file created: {}", config_file.display());
        return Ok(());
    }

    let config = loaded.unwrap_or_default();

    match &cli.command {
        Some(Commands::Replay(args)) => {
            if commands::handle_replay(args, &config)? {
                std::process::exit(1);
            }
        }
        None => {
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

fn print_config(config: Option<&Config>) {
    println!("Current configuration:");
    match config {
        Some(cfg) => {
            println!("\n  Configuration file loaded:");
            println!(
                "    Write to console: {}",
                cfg.collector.write_to_console
            );
            println!(
                "    Assert on assertment: {}",
                cfg.collector.assert_on_assertment
            );
            println!("    Replay mode: {:?}", cfg.collector.replay_mode);
            println!("    Debug channel: {:?}", cfg.debug.channel);
            println!(
                "    Color: {}",
                if cfg.output.color {
                    "enabled"
                } else {
                    "disabled"
                }
            );
        }
        None => {
            println!("\n  No configuration file loaded");
            println!(
                "  Create one with: testlog --init-config {}",
                config::CONFIG_FILE_NAMES[1]
            );
        }
    }

    println!("\nConfiguration precedence:");
    println!("  1. Command-line arguments (highest)");
    println!("  2. Configuration file");
    println!("  3. Built-in defaults (lowest)");
}
