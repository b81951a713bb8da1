// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Last-known-value store with an additive adjustment.

use crate::Reading;
use thermo_runtime::Timer;

/// Holds the last accepted [`Reading`] and the adjustment applied to raw samples.
///
/// # Example
///
/// ```
/// use thermo_core::SampleCache;
/// use thermo_runtime::TokioTimer;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let mut cache = SampleCache::new(-2.0, TokioTimer);
/// assert!(cache.current().is_none());
/// assert_eq!(cache.fallback_value(), 0.0);
///
/// let reading = cache.record(21.5);
/// assert_eq!(reading.value, 19.5);
/// assert_eq!(cache.fallback_value(), 19.5);
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SampleCache<T: Timer> {
    timer: T,
    adjustment: f64,
    current: Option<Reading<T::Instant>>,
}

impl<T: Timer> SampleCache<T> {
    #[must_use]
    pub const fn new(adjustment: f64, timer: T) -> Self {
        Self {
            timer,
            adjustment,
            current: None,
        }
    }

    /// Apply the adjustment to `raw` and store the result as current.
    pub fn record(&mut self, raw: f64) -> Reading<T::Instant> {
        self.store(raw + self.adjustment)
    }

    /// Store `value` verbatim, bypassing the adjustment.
    pub fn overwrite(&mut self, value: f64) -> Reading<T::Instant> {
        self.store(value)
    }

    #[must_use]
    pub const fn current(&self) -> Option<Reading<T::Instant>> {
        self.current
    }

    /// The current value, or `0.0` if nothing was ever recorded.
    #[must_use]
    pub fn fallback_value(&self) -> f64 {
        self.current.map_or(0.0, |reading| reading.value)
    }

    #[must_use]
    pub const fn adjustment(&self) -> f64 {
        self.adjustment
    }

    fn store(&mut self, value: f64) -> Reading<T::Instant> {
        let reading = Reading::new(value, self.timer.now());
        self.current = Some(reading);
        reading
    }
}
