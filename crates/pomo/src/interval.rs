//! Interval records and their lifecycle states

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::category::Category;
use crate::error::IntervalError;

/// Lifecycle state of an interval
///
/// Persisted as a numeric code. Decoding an unknown code fails with
/// [`IntervalError::InvalidState`], which is how corrupted records surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum IntervalState {
    #[default]
    NotStarted,
    Running,
    Paused,
    Done,
    Cancelled,
}

impl IntervalState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not started",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Done => "done",
            Self::Cancelled => "cancelled",
        }
    }

    /// Done and Cancelled are terminal; everything else can still be started
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Done | Self::Cancelled)
    }
}

impl From<IntervalState> for u8 {
    fn from(state: IntervalState) -> Self {
        match state {
            IntervalState::NotStarted => 0,
            IntervalState::Running => 1,
            IntervalState::Paused => 2,
            IntervalState::Done => 3,
            IntervalState::Cancelled => 4,
        }
    }
}

impl TryFrom<u8> for IntervalState {
    type Error = IntervalError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::NotStarted),
            1 => Ok(Self::Running),
            2 => Ok(Self::Paused),
            3 => Ok(Self::Done),
            4 => Ok(Self::Cancelled),
            other => Err(IntervalError::InvalidState(other)),
        }
    }
}

impl std::fmt::Display for IntervalState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One timed work or rest session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    /// Assigned by the store on create; zero until then
    pub id: i64,
    /// Set once, the first time the interval starts running
    pub start_time: Option<DateTime<Utc>>,
    pub planned_duration: Duration,
    /// Accumulated running time, only advanced by the tick engine
    pub actual_duration: Duration,
    pub category: Category,
    pub state: IntervalState,
}

impl Interval {
    /// A fresh, unpersisted interval
    pub fn new(category: Category, planned_duration: Duration) -> Self {
        Self {
            id: 0,
            start_time: None,
            planned_duration,
            actual_duration: Duration::ZERO,
            category,
            state: IntervalState::NotStarted,
        }
    }

    /// Time left before the interval completes
    pub fn remaining(&self) -> Duration {
        self.planned_duration.saturating_sub(self.actual_duration)
    }
}
