//! pomo - Work/rest interval timer
//!
//! Alternates focused work with short and long rests. The pieces:
//! - `category`: picks whether the next interval is work, a short rest or a long rest
//! - `factory`: creates the next interval, or resumes the unfinished one
//! - `controller`: the start/pause state machine (`Timer`)
//! - `engine`: the real-time loop that ticks a running interval forward
//! - `store`: the persistence contract and an in-memory implementation
//!
//! Commands:
//! - run: run one or more intervals with progress output
//! - config: show or save the configured durations

pub mod category;
pub mod config;
pub mod controller;
pub mod engine;
pub mod error;
pub mod factory;
pub mod interval;
pub mod store;

pub use category::Category;
pub use config::IntervalConfig;
pub use controller::Timer;
pub use error::{IntervalError, Result};
pub use interval::{Interval, IntervalState};
pub use store::{InMemoryStore, IntervalStore};
