//! Interval persistence
//!
//! The core only talks to storage through [`IntervalStore`], so the
//! in-memory store here can be swapped for a durable one without touching
//! the sequencer, factory or engine.

use anyhow::anyhow;
use std::sync::RwLock;

use crate::category::Category;
use crate::error::{IntervalError, Result};
use crate::interval::Interval;

/// Storage contract for interval records
///
/// Implementations must serialize concurrent access to a record; the tick
/// engine writes while a pause request or the sequencer may be reading.
pub trait IntervalStore: Send + Sync {
    /// Save a new interval and return its assigned id
    fn create(&self, interval: Interval) -> Result<i64>;

    /// Overwrite an existing interval
    fn update(&self, interval: &Interval) -> Result<()>;

    /// Fetch an interval by id
    fn by_id(&self, id: i64) -> Result<Interval>;

    /// Most recently created interval, or [`IntervalError::NoIntervals`]
    fn last(&self) -> Result<Interval>;

    /// Up to `n` most recent rest intervals, newest first
    fn breaks(&self, n: usize) -> Result<Vec<Interval>>;

    /// Read-modify-write a record. `f` returns whether the change should be
    /// saved; the record as seen after `f` is returned either way.
    ///
    /// The default is a plain read then update. Stores that can hold a lock
    /// across both steps should override it so concurrent writers (a pause
    /// request racing a tick) cannot lose each other's changes.
    fn update_with(&self, id: i64, f: &mut dyn FnMut(&mut Interval) -> bool) -> Result<Interval> {
        let mut interval = self.by_id(id)?;
        if f(&mut interval) {
            self.update(&interval)?;
        }
        Ok(interval)
    }
}

/// Process-local store guarded by a single lock
#[derive(Debug, Default)]
pub struct InMemoryStore {
    intervals: RwLock<Vec<Interval>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn index(&self, id: i64, len: usize) -> Result<usize> {
        if id <= 0 {
            return Err(IntervalError::InvalidId(id));
        }
        let idx = (id - 1) as usize;
        if idx >= len {
            return Err(IntervalError::NotFound(id));
        }
        Ok(idx)
    }
}

fn poisoned<T>(_: T) -> IntervalError {
    IntervalError::Store(anyhow!("interval store lock poisoned"))
}

impl IntervalStore for InMemoryStore {
    fn create(&self, mut interval: Interval) -> Result<i64> {
        let mut intervals = self.intervals.write().map_err(poisoned)?;
        interval.id = intervals.len() as i64 + 1;
        let id = interval.id;
        intervals.push(interval);
        Ok(id)
    }

    fn update(&self, interval: &Interval) -> Result<()> {
        let mut intervals = self.intervals.write().map_err(poisoned)?;
        let idx = self.index(interval.id, intervals.len())?;
        intervals[idx] = interval.clone();
        Ok(())
    }

    fn by_id(&self, id: i64) -> Result<Interval> {
        let intervals = self.intervals.read().map_err(poisoned)?;
        let idx = self.index(id, intervals.len())?;
        Ok(intervals[idx].clone())
    }

    fn last(&self) -> Result<Interval> {
        let intervals = self.intervals.read().map_err(poisoned)?;
        intervals.last().cloned().ok_or(IntervalError::NoIntervals)
    }

    fn breaks(&self, n: usize) -> Result<Vec<Interval>> {
        let intervals = self.intervals.read().map_err(poisoned)?;
        Ok(intervals
            .iter()
            .rev()
            .filter(|i| i.category != Category::Work)
            .take(n)
            .cloned()
            .collect())
    }

    fn update_with(&self, id: i64, f: &mut dyn FnMut(&mut Interval) -> bool) -> Result<Interval> {
        let mut intervals = self.intervals.write().map_err(poisoned)?;
        let idx = self.index(id, intervals.len())?;
        let mut interval = intervals[idx].clone();
        if f(&mut interval) {
            intervals[idx] = interval.clone();
        }
        Ok(interval)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::IntervalState;
    use std::time::Duration;

    fn interval(category: Category) -> Interval {
        Interval::new(category, Duration::from_secs(60))
    }

    #[test]
    fn test_create_assigns_sequential_ids() {
        let store = InMemoryStore::new();
        assert_eq!(store.create(interval(Category::Work)).unwrap(), 1);
        assert_eq!(store.create(interval(Category::ShortRest)).unwrap(), 2);

        let fetched = store.by_id(2).unwrap();
        assert_eq!(fetched.id, 2);
        assert_eq!(fetched.category, Category::ShortRest);
    }

    #[test]
    fn test_update_round_trip() {
        let store = InMemoryStore::new();
        let id = store.create(interval(Category::Work)).unwrap();

        let mut stored = store.by_id(id).unwrap();
        stored.state = IntervalState::Running;
        stored.actual_duration = Duration::from_secs(12);
        store.update(&stored).unwrap();

        assert_eq!(store.by_id(id).unwrap(), stored);
    }

    #[test]
    fn test_update_with_zero_id_is_invalid() {
        let store = InMemoryStore::new();
        store.create(interval(Category::Work)).unwrap();

        let err = store.update(&interval(Category::Work)).unwrap_err();
        assert!(matches!(err, IntervalError::InvalidId(0)));
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let store = InMemoryStore::new();
        store.create(interval(Category::Work)).unwrap();

        assert!(matches!(store.by_id(5).unwrap_err(), IntervalError::NotFound(5)));
        assert!(matches!(store.by_id(-1).unwrap_err(), IntervalError::InvalidId(-1)));

        let mut ghost = interval(Category::Work);
        ghost.id = 7;
        assert!(matches!(store.update(&ghost).unwrap_err(), IntervalError::NotFound(7)));
    }

    #[test]
    fn test_last_on_empty_store() {
        let store = InMemoryStore::new();
        assert!(matches!(store.last().unwrap_err(), IntervalError::NoIntervals));

        store.create(interval(Category::Work)).unwrap();
        store.create(interval(Category::LongRest)).unwrap();
        assert_eq!(store.last().unwrap().id, 2);
    }

    #[test]
    fn test_update_with_saves_only_when_asked() {
        let store = InMemoryStore::new();
        let id = store.create(interval(Category::Work)).unwrap();

        let seen = store
            .update_with(id, &mut |i: &mut Interval| {
                i.actual_duration = Duration::from_secs(9);
                false
            })
            .unwrap();
        assert_eq!(seen.actual_duration, Duration::from_secs(9));
        assert_eq!(store.by_id(id).unwrap().actual_duration, Duration::ZERO);

        store
            .update_with(id, &mut |i: &mut Interval| {
                i.state = IntervalState::Paused;
                true
            })
            .unwrap();
        assert_eq!(store.by_id(id).unwrap().state, IntervalState::Paused);

        assert!(matches!(
            store.update_with(0, &mut |_: &mut Interval| true).unwrap_err(),
            IntervalError::InvalidId(0)
        ));
    }

    #[test]
    fn test_breaks_newest_first_without_work() {
        let store = InMemoryStore::new();
        for category in [
            Category::Work,
            Category::ShortRest,
            Category::Work,
            Category::LongRest,
            Category::Work,
            Category::ShortRest,
            Category::Work,
        ] {
            store.create(interval(category)).unwrap();
        }

        let ids: Vec<i64> = store.breaks(2).unwrap().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![6, 4]);

        let all = store.breaks(10).unwrap();
        assert_eq!(all.len(), 3);
        assert!(all.iter().all(|i| i.category.is_rest()));
    }
}
