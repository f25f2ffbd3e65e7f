//! Logical time
//!
//! Operations are totally ordered, so records are stamped with a logical
//! tick rather than wall-clock time. A tick is taken once per committed
//! operation; two records stamped by the same clock are therefore always
//! comparable, and `updated_at >= created_at` holds by construction.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// A logical timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    /// The origin of logical time
    pub const GENESIS: Timestamp = Timestamp(0);

    pub const fn new(tick: u64) -> Self {
        Self(tick)
    }

    /// Returns the raw tick value
    pub fn tick(&self) -> u64 {
        self.0
    }

    /// Returns this timestamp advanced by `ticks`, saturating at the maximum
    pub fn advanced_by(&self, ticks: u64) -> Timestamp {
        Timestamp(self.0.saturating_add(ticks))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// Monotonic logical clock
///
/// Clones share the same underlying counter, so every component of one
/// deployment observes a single timeline. `tick()` advances and returns the
/// new time; `now()` reads it without advancing.
#[derive(Debug, Clone, Default)]
pub struct LogicalClock {
    current: Arc<AtomicU64>,
}

impl LogicalClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a clock that resumes from a known time
    pub fn starting_at(at: Timestamp) -> Self {
        Self {
            current: Arc::new(AtomicU64::new(at.tick())),
        }
    }

    /// Returns the current time without advancing
    pub fn now(&self) -> Timestamp {
        Timestamp(self.current.load(Ordering::SeqCst))
    }

    /// Advances the clock by one tick and returns the new time
    pub fn tick(&self) -> Timestamp {
        Timestamp(self.current.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Advances the clock by `ticks` without stamping anything
    pub fn advance(&self, ticks: u64) -> Timestamp {
        Timestamp(self.current.fetch_add(ticks, Ordering::SeqCst) + ticks)
    }
}
