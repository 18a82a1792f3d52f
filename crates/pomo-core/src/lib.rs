//! pomo-core - Shared plumbing for the pomo work/rest timer
//!
//! Everything here is peripheral to the interval state machine: where files
//! live, how the settings file is read, and how durations are printed.

pub mod config;
pub mod format;
pub mod paths;

pub use config::Config;
pub use paths::Paths;
