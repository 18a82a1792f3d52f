//! Error types for interval operations

use thiserror::Error;

/// Errors raised by the interval core and its store
#[derive(Error, Debug)]
pub enum IntervalError {
    /// The store holds no intervals yet. Callers branch on this rather than fail.
    #[error("No intervals")]
    NoIntervals,

    #[error("Invalid interval id: {0}")]
    InvalidId(i64),

    #[error("Interval not found: {0}")]
    NotFound(i64),

    #[error("Interval not running")]
    IntervalNotRunning,

    #[error("Interval is completed or cancelled: cannot start")]
    IntervalCompleted,

    #[error("Invalid interval state: {0}")]
    InvalidState(u8),

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl IntervalError {
    /// Process exit code for the command-line front end
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NoIntervals => 2,
            Self::InvalidId(_) => 3,
            Self::NotFound(_) => 4,
            Self::IntervalNotRunning => 5,
            Self::IntervalCompleted => 6,
            Self::InvalidState(_) => 7,
            Self::Store(_) => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, IntervalError>;
