//! Interval categories and the rule that picks the next one
//!
//! Work always follows a rest. After work, a long rest is due unless one
//! of the last three rests was already long.

use serde::{Deserialize, Serialize};

use crate::error::{IntervalError, Result};
use crate::store::IntervalStore;

/// How many recent rests are inspected when choosing between short and long
const REST_WINDOW: usize = 3;

/// Kind of interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Work,
    ShortRest,
    LongRest,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Work => "work",
            Category::ShortRest => "short rest",
            Category::LongRest => "long rest",
        }
    }

    pub fn is_rest(&self) -> bool {
        matches!(self, Category::ShortRest | Category::LongRest)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Decide the category of the next interval from the store's history
pub fn next_category<S: IntervalStore + ?Sized>(store: &S) -> Result<Category> {
    let last = match store.last() {
        Ok(last) => last,
        Err(IntervalError::NoIntervals) => return Ok(Category::Work),
        Err(e) => return Err(e),
    };

    if last.category.is_rest() {
        return Ok(Category::Work);
    }

    let rests = store.breaks(REST_WINDOW)?;
    if rests.len() < REST_WINDOW {
        return Ok(Category::LongRest);
    }

    if rests.iter().any(|i| i.category == Category::LongRest) {
        Ok(Category::ShortRest)
    } else {
        Ok(Category::LongRest)
    }
}
