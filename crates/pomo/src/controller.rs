//! Session controller: the interval state machine
//!
//! `Timer` ties a store and a config together and exposes the operations a
//! front end needs: find or create the current interval, start it, pause it.

use chrono::Utc;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::category::{self, Category};
use crate::config::IntervalConfig;
use crate::engine;
use crate::error::{IntervalError, Result};
use crate::factory;
use crate::interval::{Interval, IntervalState};
use crate::store::IntervalStore;

/// Interval timer over a shared store
pub struct Timer<S: ?Sized> {
    store: Arc<S>,
    config: IntervalConfig,
}

impl<S: ?Sized> Clone for Timer<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            config: self.config,
        }
    }
}

impl<S: IntervalStore + ?Sized> Timer<S> {
    pub fn new(store: Arc<S>, config: IntervalConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &IntervalConfig {
        &self.config
    }

    /// Category the next created interval would get
    pub fn next_category(&self) -> Result<Category> {
        category::next_category(self.store.as_ref())
    }

    /// Create and persist the next interval
    pub fn create_next(&self) -> Result<Interval> {
        factory::create_next(self.store.as_ref(), &self.config)
    }

    /// Latest interval if still resumable, otherwise a new one
    pub fn resolve_current(&self) -> Result<Interval> {
        factory::resolve_current(self.store.as_ref(), &self.config)
    }

    /// Latest interval regardless of state
    pub fn current(&self) -> Result<Interval> {
        self.store.last()
    }

    /// Start or resume `interval` and block until it finishes, is cancelled
    /// through `cancel`, or is paused by someone else.
    ///
    /// Starting an interval that is already running is a no-op.
    pub async fn start<A, T, E>(
        &self,
        cancel: &CancellationToken,
        interval: &Interval,
        on_start: A,
        on_tick: T,
        on_end: E,
    ) -> Result<()>
    where
        A: FnMut(&Interval),
        T: FnMut(&Interval),
        E: FnMut(&Interval),
    {
        match interval.state {
            IntervalState::Running => return Ok(()),
            IntervalState::Done | IntervalState::Cancelled => {
                return Err(IntervalError::IntervalCompleted);
            }
            IntervalState::NotStarted | IntervalState::Paused => {}
        }

        // The stored record decides; the snapshot may be stale
        let now = Utc::now();
        let mut stored_state = interval.state;
        let running = self.store.update_with(interval.id, &mut |i: &mut Interval| {
            stored_state = i.state;
            match i.state {
                IntervalState::NotStarted => {
                    i.start_time = Some(now);
                    i.state = IntervalState::Running;
                    true
                }
                IntervalState::Paused => {
                    i.state = IntervalState::Running;
                    true
                }
                IntervalState::Running | IntervalState::Done | IntervalState::Cancelled => false,
            }
        })?;

        match stored_state {
            IntervalState::Running => return Ok(()),
            IntervalState::Done | IntervalState::Cancelled => {
                return Err(IntervalError::IntervalCompleted);
            }
            IntervalState::NotStarted => {
                debug!(id = running.id, category = %running.category, "starting interval");
            }
            IntervalState::Paused => {
                debug!(id = running.id, actual = ?running.actual_duration, "resuming interval");
            }
        }

        engine::run(
            self.store.as_ref(),
            &self.config,
            cancel,
            running.id,
            on_start,
            on_tick,
            on_end,
        )
        .await
    }

    /// Pause a running interval
    ///
    /// The caller's snapshot must be running, and so must the stored record;
    /// only the state is written so time already counted by the engine is kept.
    pub fn pause(&self, interval: &Interval) -> Result<()> {
        if interval.state != IntervalState::Running {
            return Err(IntervalError::IntervalNotRunning);
        }

        let mut was_running = false;
        self.store.update_with(interval.id, &mut |i: &mut Interval| {
            was_running = i.state == IntervalState::Running;
            if was_running {
                i.state = IntervalState::Paused;
            }
            was_running
        })?;

        if !was_running {
            return Err(IntervalError::IntervalNotRunning);
        }
        debug!(id = interval.id, "interval paused");
        Ok(())
    }
}
