//! Creating the next interval, or picking up the one in progress

use crate::category::next_category;
use crate::config::IntervalConfig;
use crate::error::{IntervalError, Result};
use crate::interval::Interval;
use crate::store::IntervalStore;

/// Create and persist the interval that should come next
pub fn create_next<S: IntervalStore + ?Sized>(store: &S, config: &IntervalConfig) -> Result<Interval> {
    let category = next_category(store)?;
    let mut interval = Interval::new(category, config.planned_for(category));
    interval.id = store.create(interval.clone())?;
    Ok(interval)
}

/// Return the latest interval if it can still run, otherwise create the next one
///
/// Calling this again after a restart resumes the same record instead of
/// creating a duplicate.
pub fn resolve_current<S: IntervalStore + ?Sized>(store: &S, config: &IntervalConfig) -> Result<Interval> {
    match store.last() {
        Ok(last) if !last.state.is_finished() => Ok(last),
        Ok(_) | Err(IntervalError::NoIntervals) => create_next(store, config),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;
    use crate::config::DEFAULT_WORK;
    use crate::interval::IntervalState;
    use crate::store::InMemoryStore;
    use std::time::Duration;

    #[test]
    fn test_empty_store_creates_default_work() {
        let store = InMemoryStore::new();
        let interval = resolve_current(&store, &IntervalConfig::default()).unwrap();

        assert_eq!(interval.id, 1);
        assert_eq!(interval.category, Category::Work);
        assert_eq!(interval.planned_duration, DEFAULT_WORK);
        assert_eq!(interval.planned_duration, Duration::from_secs(25 * 60));
        assert_eq!(interval.state, IntervalState::NotStarted);
        assert_eq!(store.by_id(1).unwrap(), interval);
    }

    #[test]
    fn test_resolve_is_idempotent_for_unfinished() {
        let store = InMemoryStore::new();
        let config = IntervalConfig::default();

        let first = resolve_current(&store, &config).unwrap();
        let again = resolve_current(&store, &config).unwrap();
        assert_eq!(first.id, again.id);

        let mut paused = again;
        paused.state = IntervalState::Paused;
        store.update(&paused).unwrap();
        assert_eq!(resolve_current(&store, &config).unwrap().id, first.id);
    }

    #[test]
    fn test_finished_interval_creates_next() {
        let store = InMemoryStore::new();
        let config = IntervalConfig::new(
            Duration::from_secs(10),
            Duration::from_secs(2),
            Duration::from_secs(6),
        );

        for state in [IntervalState::Done, IntervalState::Cancelled] {
            let mut current = resolve_current(&store, &config).unwrap();
            current.state = state;
            store.update(&current).unwrap();

            let next = resolve_current(&store, &config).unwrap();
            assert_eq!(next.id, current.id + 1);
        }

        // Work, then LongRest (fewer than three rests so far)
        let first = store.by_id(1).unwrap();
        let second = store.by_id(2).unwrap();
        assert_eq!(first.category, Category::Work);
        assert_eq!(second.category, Category::LongRest);
        assert_eq!(second.planned_duration, Duration::from_secs(6));
    }

    #[test]
    fn test_create_next_follows_rest_with_work() {
        let store = InMemoryStore::new();
        store
            .create(Interval::new(Category::ShortRest, Duration::from_secs(60)))
            .unwrap();

        let interval = create_next(&store, &IntervalConfig::default()).unwrap();
        assert_eq!(interval.category, Category::Work);
        assert_eq!(interval.id, 2);
    }
}
