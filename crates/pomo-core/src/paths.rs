//! Standard paths used by pomo

use std::path::PathBuf;

/// Standard pomo paths
pub struct Paths {
    /// Config directory (~/.config/pomo)
    pub config: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Self::new()
    }
}

impl Paths {
    pub fn new() -> Self {
        let config = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("pomo");

        Self { config }
    }

    /// Get the settings file path
    pub fn config_file(&self) -> PathBuf {
        self.config.join("config.json")
    }
}
