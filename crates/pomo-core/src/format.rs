//! Formatting utilities

use std::time::Duration;

/// Format a duration in human-readable form
pub fn duration(d: Duration) -> String {
    let seconds = d.as_secs();
    if seconds < 60 {
        format!("{}s", seconds)
    } else if seconds < 3600 {
        format!("{}m {}s", seconds / 60, seconds % 60)
    } else {
        format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
    }
}

/// Format a duration as a countdown clock (MM:SS)
pub fn clock(d: Duration) -> String {
    let seconds = d.as_secs();
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Render a fixed-width progress bar for `done` out of `total`
pub fn progress_bar(done: Duration, total: Duration, width: usize) -> String {
    let filled = if total.is_zero() {
        width
    } else {
        ((done.as_secs_f64() / total.as_secs_f64()) * width as f64).min(width as f64) as usize
    };
    format!("{}{}", "\u{2588}".repeat(filled), "\u{2591}".repeat(width - filled))
}
