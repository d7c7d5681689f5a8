//! Cadence policy.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Rule distributing manifest entries across calendar slots.
///
/// Entries fill each day up to `per_day` before advancing to the next
/// day; within a day they take the configured times in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_setters::Setters)]
#[setters(prefix = "with_")]
pub struct CadencePolicy {
    /// Daily posting quota
    pub per_day: usize,
    /// Target times of day, cycled within a day
    pub times: Vec<NaiveTime>,
}

impl Default for CadencePolicy {
    fn default() -> Self {
        Self {
            per_day: 2,
            times: vec![
                NaiveTime::from_hms_opt(10, 0, 0).unwrap_or_default(),
                NaiveTime::from_hms_opt(18, 0, 0).unwrap_or_default(),
            ],
        }
    }
}

impl CadencePolicy {
    /// Time of day for the `index_in_day`-th post of a day.
    pub(crate) fn time_for(&self, index_in_day: usize) -> NaiveTime {
        if self.times.is_empty() {
            return NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default();
        }
        self.times[index_in_day % self.times.len()]
    }
}
