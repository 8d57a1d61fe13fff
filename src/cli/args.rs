// CLI argument definitions using Clap

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::collector::ReplayMode;
use crate::config::Config;

/// Output format for replayed events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayFormat {
    Text,
    Json,
}

impl std::str::FromStr for ReplayFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("unknown format: {}", s)),
        }
    }
}

/// Record unit-test output and replay it, failures first
#[derive(Parser, Debug)]
#[command(name = "testlog")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Replay recorded test output, optionally failures only", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose debug output
    #[arg(short = 'v', long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Show current configuration and exit
    #[arg(long, default_value_t = false)]
    pub config: bool,

    /// Create default configuration file
    #[arg(long, value_name = "CONFIG_FILE")]
    pub init_config: Option<PathBuf>,

    /// Print shell completion script (bash, zsh, fish, powershell)
    #[arg(long, value_name = "SHELL_TYPE", value_parser = ["bash", "zsh", "fish", "powershell"])]
    pub completion: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Collect a JSON-lines event stream and replay it
    Replay(ReplayArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct ReplayArgs {
    /// Event stream to read (stdin when omitted or "-")
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Replay every event, even when some tests failed
    #[arg(long, default_value_t = false)]
    pub all: bool,

    /// Mirror events to the console while collecting
    #[arg(long, default_value_t = false)]
    pub console: bool,

    /// Replay format (text, json)
    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    pub format: String,

    /// Disable colored output
    #[arg(long, default_value_t = false)]
    pub no_color: bool,
}

impl ReplayArgs {
    /// Replay mode; `--all` wins over the configured one
    pub fn replay_mode(&self, config: &Config) -> ReplayMode {
        if self.all {
            ReplayMode::WriteAll
        } else {
            config.collector.replay_mode
        }
    }

    pub fn replay_format(&self) -> ReplayFormat {
        self.format.parse().unwrap_or(ReplayFormat::Text)
    }

    /// Reads stdin when no file (or "-") was given
    pub fn reads_stdin(&self) -> bool {
        self.input
            .as_deref()
            .is_none_or(|p| p.as_os_str() == "-")
    }
}
