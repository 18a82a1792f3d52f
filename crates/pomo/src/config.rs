//! Planned durations for each interval category

use std::time::Duration;

use crate::category::Category;

pub const DEFAULT_WORK: Duration = Duration::from_secs(25 * 60);
pub const DEFAULT_SHORT_REST: Duration = Duration::from_secs(5 * 60);
pub const DEFAULT_LONG_REST: Duration = Duration::from_secs(15 * 60);
pub const DEFAULT_TICK: Duration = Duration::from_secs(1);

/// Durations used when creating and running intervals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalConfig {
    pub work: Duration,
    pub short_rest: Duration,
    pub long_rest: Duration,
    /// Length of one tick; also the amount added to `actual_duration` per tick
    pub tick: Duration,
}

impl Default for IntervalConfig {
    fn default() -> Self {
        Self {
            work: DEFAULT_WORK,
            short_rest: DEFAULT_SHORT_REST,
            long_rest: DEFAULT_LONG_REST,
            tick: DEFAULT_TICK,
        }
    }
}

impl IntervalConfig {
    /// Build a config; zero durations fall back to the defaults
    pub fn new(work: Duration, short_rest: Duration, long_rest: Duration) -> Self {
        let or_default = |d: Duration, default: Duration| if d.is_zero() { default } else { d };

        Self {
            work: or_default(work, DEFAULT_WORK),
            short_rest: or_default(short_rest, DEFAULT_SHORT_REST),
            long_rest: or_default(long_rest, DEFAULT_LONG_REST),
            tick: DEFAULT_TICK,
        }
    }

    /// Build a config from the settings file
    pub fn from_settings(settings: &pomo_core::Config) -> Self {
        Self::new(
            Duration::from_secs(settings.work_minutes.saturating_mul(60)),
            Duration::from_secs(settings.short_rest_minutes.saturating_mul(60)),
            Duration::from_secs(settings.long_rest_minutes.saturating_mul(60)),
        )
    }

    /// Override the tick length; a zero tick is ignored
    pub fn with_tick(mut self, tick: Duration) -> Self {
        if !tick.is_zero() {
            self.tick = tick;
        }
        self
    }

    /// Planned duration for an interval of the given category
    pub fn planned_for(&self, category: Category) -> Duration {
        match category {
            Category::Work => self.work,
            Category::ShortRest => self.short_rest,
            Category::LongRest => self.long_rest,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_means_default() {
        let config = IntervalConfig::new(Duration::ZERO, Duration::ZERO, Duration::ZERO);
        assert_eq!(config, IntervalConfig::default());
        assert_eq!(config.work, Duration::from_secs(1500));
        assert_eq!(config.short_rest, Duration::from_secs(300));
        assert_eq!(config.long_rest, Duration::from_secs(900));
    }

    #[test]
    fn test_explicit_values_kept() {
        let config = IntervalConfig::new(
            Duration::from_secs(10),
            Duration::ZERO,
            Duration::from_secs(30),
        );
        assert_eq!(config.planned_for(Category::Work), Duration::from_secs(10));
        assert_eq!(config.planned_for(Category::ShortRest), DEFAULT_SHORT_REST);
        assert_eq!(config.planned_for(Category::LongRest), Duration::from_secs(30));
    }

    #[test]
    fn test_from_settings() {
        let settings = pomo_core::Config {
            work_minutes: 50,
            short_rest_minutes: 0,
            long_rest_minutes: 20,
        };
        let config = IntervalConfig::from_settings(&settings);
        assert_eq!(config.work, Duration::from_secs(50 * 60));
        assert_eq!(config.short_rest, DEFAULT_SHORT_REST);
        assert_eq!(config.long_rest, Duration::from_secs(20 * 60));
    }

    #[test]
    fn test_from_settings_saturates_huge_values() {
        let settings = pomo_core::Config {
            work_minutes: u64::MAX,
            short_rest_minutes: u64::MAX / 60 + 1,
            long_rest_minutes: 1,
        };
        let config = IntervalConfig::from_settings(&settings);
        assert_eq!(config.work, Duration::from_secs(u64::MAX));
        assert_eq!(config.short_rest, Duration::from_secs(u64::MAX));
        assert_eq!(config.long_rest, Duration::from_secs(60));
    }

    #[test]
    fn test_with_tick() {
        let config = IntervalConfig::default().with_tick(Duration::from_millis(100));
        assert_eq!(config.tick, Duration::from_millis(100));
        assert_eq!(IntervalConfig::default().with_tick(Duration::ZERO).tick, DEFAULT_TICK);
    }
}
