//! Settings file for pomo
//!
//! Durations are stored in whole minutes. A value of zero means "use the
//! built-in default", matching how the interval configuration treats zero.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// User settings loaded from `config.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Work session length (minutes)
    #[serde(default = "default_work_minutes")]
    pub work_minutes: u64,

    /// Short rest length (minutes)
    #[serde(default = "default_short_rest_minutes")]
    pub short_rest_minutes: u64,

    /// Long rest length (minutes)
    #[serde(default = "default_long_rest_minutes")]
    pub long_rest_minutes: u64,
}

fn default_work_minutes() -> u64 {
    25
}

fn default_short_rest_minutes() -> u64 {
    5
}

fn default_long_rest_minutes() -> u64 {
    15
}

impl Default for Config {
    fn default() -> Self {
        Self {
            work_minutes: default_work_minutes(),
            short_rest_minutes: default_short_rest_minutes(),
            long_rest_minutes: default_long_rest_minutes(),
        }
    }
}

impl Config {
    /// Load config from file, falling back to defaults when it does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))
    }

    /// Apply command-line overrides; `None` keeps the loaded value
    pub fn with_overrides(mut self, work: Option<u64>, short_rest: Option<u64>, long_rest: Option<u64>) -> Self {
        if let Some(mins) = work {
            self.work_minutes = mins;
        }
        if let Some(mins) = short_rest {
            self.short_rest_minutes = mins;
        }
        if let Some(mins) = long_rest {
            self.long_rest_minutes = mins;
        }
        self
    }
}
