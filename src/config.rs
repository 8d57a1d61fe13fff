// Configuration file handling

use crate::collector::ReplayMode;
use crate::output::DebugChannel;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub collector: CollectorConfig,

    #[serde(default)]
    pub debug: DebugConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CollectorConfig {
    /// Mirror every event to the console while collecting
    #[serde(default)]
    pub write_to_console: bool,

    /// Panic on the first failed assertion (debug builds only)
    #[serde(default)]
    pub assert_on_assertment: bool,

    /// Replay mode: "failures-only" or "all"
    #[serde(default)]
    pub replay_mode: ReplayMode,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DebugConfig {
    /// Debug stream channel: "tracing" or "null"
    #[serde(default)]
    pub channel: DebugChannel,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Enable colored output
    #[serde(default = "default_color")]
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: default_color(),
        }
    }
}

fn default_color() -> bool {
    true
}

pub const CONFIG_FILE_NAMES: [&str; 2] = [".testlogrc", ".testlogrc.toml"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

impl Config {
    /// Load configuration from default locations
    pub fn load() -> Option<Self> {
        // Check locations in order:
        // 1. .testlogrc (current directory)
        // 2. ~/.testlogrc (home directory)
        // 3. .testlogrc.toml (current directory)
        // 4. ~/.testlogrc.toml (home directory)

        let cwd = std::env::current_dir().ok()?;
        let home = dirs::home_dir();

        let mut paths = Vec::new();
        for name in CONFIG_FILE_NAMES {
            paths.push(cwd.join(name));
            if let Some(home) = &home {
                paths.push(home.join(name));
            }
        }

        let path = paths.iter().find(|p| p.exists())?;
        match Self::load_from_file(path) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!("Ignoring {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Generate configuration as TOML
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_else(|_| String::new())
    }
}
