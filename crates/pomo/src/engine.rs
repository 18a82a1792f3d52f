//! Tick engine: drives a running interval forward in real time
//!
//! One task waits on three sources (the tick cadence, the completion
//! deadline and the cancellation token) and reacts to whichever is ready
//! first. Pauses are not pushed to the engine; they are noticed by re-reading
//! the record at each tick, so the tick that observes a pause adds no time.

use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::config::IntervalConfig;
use crate::error::Result;
use crate::interval::{Interval, IntervalState};
use crate::store::IntervalStore;

/// Run interval `id`, which must already be marked running, until it
/// completes, is cancelled, or is found paused.
pub async fn run<S, A, T, E>(
    store: &S,
    config: &IntervalConfig,
    cancel: &CancellationToken,
    id: i64,
    mut on_start: A,
    mut on_tick: T,
    mut on_end: E,
) -> Result<()>
where
    S: IntervalStore + ?Sized,
    A: FnMut(&Interval),
    T: FnMut(&Interval),
    E: FnMut(&Interval),
{
    let interval = store.by_id(id)?;

    let mut ticker = time::interval_at(Instant::now() + config.tick, config.tick);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let expire = time::sleep(interval.remaining());
    tokio::pin!(expire);

    debug!(id, remaining = ?interval.remaining(), "interval running");
    on_start(&interval);

    loop {
        tokio::select! {
            biased;

            _ = cancel.cancelled() => {
                let mut interval = store.by_id(id)?;
                interval.state = IntervalState::Cancelled;
                store.update(&interval)?;
                debug!(id, actual = ?interval.actual_duration, "interval cancelled");
                return Ok(());
            }
            _ = ticker.tick() => {
                let interval = store.update_with(id, &mut |i: &mut Interval| {
                    if i.state == IntervalState::Paused {
                        return false;
                    }
                    i.actual_duration += config.tick;
                    true
                })?;
                if interval.state == IntervalState::Paused {
                    debug!(id, actual = ?interval.actual_duration, "pause observed");
                    return Ok(());
                }
                trace!(id, actual = ?interval.actual_duration, "tick");
                on_tick(&interval);
            }
            _ = &mut expire => {
                let mut interval = store.by_id(id)?;
                interval.state = IntervalState::Done;
                on_end(&interval);
                store.update(&interval)?;
                debug!(id, actual = ?interval.actual_duration, "interval done");
                return Ok(());
            }
        }
    }
}
