// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Read coalescing with cached fallback.
//!
//! [`RequestCoalescer`] turns any number of concurrent "give me the current value"
//! requests into at most one outstanding device poll per batch. Requests are parked
//! until the device announces a sample, then the whole batch is answered at once.
//! When the device cannot answer (absent, inactive, transport failure, deadline) the
//! batch is answered with the last known value, or `0.0` if there never was one.
//!
//! # Batch rules
//!
//! - Every request that finds the device ready re-triggers a poll. Devices treat a
//!   repeated poll as harmless, and a re-trigger recovers a poll whose sample was lost.
//! - A request arriving while **more than one** request is already parked first
//!   answers the parked batch from the cache, then opens a fresh batch. A batch whose
//!   sample notification was lost therefore cannot starve callers.
//! - A sample arriving with nothing parked is ignored: the cache is not touched.
//! - Every parked responder is invoked exactly once, in arrival order, and always
//!   with `Ok(value)`.
//!
//! # Locking
//!
//! The parked requests and the cache share one mutex. Each operation mutates them
//! under a single lock acquisition. The device lookup runs before the lock is taken;
//! responders and `request_sample()` run after it is released. Locators, devices and
//! responders may all call back into the coalescer.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use thermo_core::DeviceRegistry;
//! use thermo_exec::{GetOutcome, RequestCoalescer};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! // Nothing is registered under the host, so the request falls back immediately.
//! let coalescer = RequestCoalescer::new("10.0.0.5", Arc::new(DeviceRegistry::new()), 0.0);
//!
//! let outcome = coalescer.get(Box::new(|value: thermo_core::Result<f64>| {
//!     assert_eq!(value.unwrap(), 0.0);
//! }));
//! assert!(matches!(outcome, GetOutcome::Fallback { value, .. } if value == 0.0));
//! # }
//! ```

use core::fmt;
use core::time::Duration;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use thermo_core::{
    presence, DeviceHandle, DeviceLocator, FallbackReason, Presence, Reading, Responder, ResultExt,
    SampleCache,
};
use thermo_runtime::{MutexLike, Runtime, Timer, TokioRuntime};

/// Identifier of a parked request. Monotonic per coalescer, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What happened to a request handed to [`RequestCoalescer::get`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GetOutcome {
    /// Parked until the next sample (or fallback) resolves its batch.
    Pending(RequestId),
    /// Already answered from the cache.
    Fallback { value: f64, reason: FallbackReason },
    /// Already answered with the configured fixed value; the device was not consulted.
    Fixed(f64),
}

struct PendingRequest<I> {
    responder: Responder,
    deadline: Option<I>,
}

struct CoalescerState<T: Timer> {
    pending: BTreeMap<RequestId, PendingRequest<T::Instant>>,
    next_id: u64,
    cache: SampleCache<T>,
    fallbacks: HashMap<FallbackReason, usize>,
}

impl<T: Timer> CoalescerState<T> {
    fn park(&mut self, responder: Responder, deadline: Option<T::Instant>) -> RequestId {
        let id = RequestId(self.next_id);
        self.next_id += 1;
        self.pending.insert(
            id,
            PendingRequest {
                responder,
                deadline,
            },
        );
        id
    }

    fn take_batch(&mut self, value: f64) -> Batch {
        let pending = core::mem::take(&mut self.pending);
        Batch {
            value,
            responders: pending.into_values().map(|p| p.responder).collect(),
        }
    }

    fn take_fallback_batch(&mut self, reason: FallbackReason) -> Batch {
        let value = self.cache.fallback_value();
        let batch = self.take_batch(value);
        self.count_fallbacks(reason, batch.responders.len());
        batch
    }

    fn count_fallbacks(&mut self, reason: FallbackReason, count: usize) {
        if count > 0 {
            *self.fallbacks.entry(reason).or_default() += count;
        }
    }
}

/// Responders detached from the state, answered once the lock is gone.
struct Batch {
    value: f64,
    responders: Vec<Responder>,
}

impl Batch {
    fn resolve(self) -> usize {
        let count = self.responders.len();
        for responder in self.responders {
            responder(Ok(self.value));
        }
        count
    }
}

enum Decision {
    Poll(Arc<dyn DeviceHandle>),
    Fallback(FallbackReason, Batch),
}

/// Coalesces concurrent reads into one device poll per batch.
///
/// Cheap to clone; clones share the parked requests and the cache.
pub struct RequestCoalescer<R: Runtime = TokioRuntime> {
    state: R::Mutex<CoalescerState<R::Timer>>,
    locator: Arc<dyn DeviceLocator>,
    host: Arc<str>,
    timer: R::Timer,
    request_timeout: Option<Duration>,
}

impl RequestCoalescer<TokioRuntime> {
    /// Coalescer on the tokio runtime without request deadlines.
    pub fn new(host: impl Into<Arc<str>>, locator: Arc<dyn DeviceLocator>, adjustment: f64) -> Self {
        Self::with_runtime(host, locator, adjustment, None)
    }
}

impl<R: Runtime> RequestCoalescer<R> {
    /// `request_timeout` stamps each parked request with a deadline; see
    /// [`expire_overdue`](Self::expire_overdue).
    pub fn with_runtime(
        host: impl Into<Arc<str>>,
        locator: Arc<dyn DeviceLocator>,
        adjustment: f64,
        request_timeout: Option<Duration>,
    ) -> Self {
        let timer = R::Timer::default();
        Self {
            state: <R::Mutex<CoalescerState<R::Timer>> as MutexLike<_>>::new(CoalescerState {
                pending: BTreeMap::new(),
                next_id: 0,
                cache: SampleCache::new(adjustment, timer.clone()),
                fallbacks: HashMap::new(),
            }),
            locator,
            host: host.into(),
            timer,
            request_timeout,
        }
    }

    /// Serve one request: park it behind a device poll, or answer it from the cache.
    pub fn get(&self, responder: Responder) -> GetOutcome {
        let deadline = self.request_timeout.map(|t| self.timer.now() + t);
        let device = presence(&*self.locator, &self.host);

        let mut state = self.state.lock();
        let stale = (state.pending.len() > 1)
            .then(|| state.take_fallback_batch(FallbackReason::StaleBatch));
        let id = state.park(responder, deadline);
        let decision = match device {
            Presence::Ready(device) => Decision::Poll(device),
            Presence::Absent => Decision::Fallback(
                FallbackReason::DeviceAbsent,
                state.take_fallback_batch(FallbackReason::DeviceAbsent),
            ),
            Presence::Inactive => Decision::Fallback(
                FallbackReason::DeviceInactive,
                state.take_fallback_batch(FallbackReason::DeviceInactive),
            ),
        };
        drop(state);

        if let Some(stale) = stale {
            let value = stale.value;
            let count = stale.resolve();
            crate::warn!(
                "{}: {}, answered {} request(s) with cached value {} before {}",
                self.host,
                FallbackReason::StaleBatch,
                count,
                value,
                id
            );
        }

        match decision {
            Decision::Poll(device) => match device
                .request_sample()
                .with_context(|| format!("sample request for {id}"))
            {
                Ok(()) => {
                    crate::debug!("{}: {} waiting for device sample", self.host, id);
                    GetOutcome::Pending(id)
                }
                Err(error) => {
                    crate::warn!("{}: {}", self.host, error);
                    self.fallback(FallbackReason::TransportFailed)
                }
            },
            Decision::Fallback(reason, batch) => {
                let value = batch.value;
                let count = batch.resolve();
                crate::debug!(
                    "{}: {}, answered {} request(s) with cached value {}",
                    self.host,
                    reason,
                    count,
                    value
                );
                GetOutcome::Fallback { value, reason }
            }
        }
    }

    /// Accept a sample announced by the device.
    ///
    /// Returns the recorded reading, or `None` when nothing was waiting and the sample
    /// was ignored.
    pub fn on_sample(&self, raw: f64) -> Option<Reading<R::Instant>> {
        let mut state = self.state.lock();
        if state.pending.is_empty() {
            drop(state);
            crate::debug!("{}: ignoring sample {} with no request waiting", self.host, raw);
            return None;
        }
        let reading = state.cache.record(raw);
        let batch = state.take_batch(reading.value);
        drop(state);

        let count = batch.resolve();
        crate::info!(
            "{}: sample {} accepted as {}, answered {} request(s)",
            self.host,
            raw,
            reading.value,
            count
        );
        Some(reading)
    }

    /// Answer every parked request with `value` and return how many there were.
    pub fn resolve_all(&self, value: f64) -> usize {
        let batch = self.state.lock().take_batch(value);
        batch.resolve()
    }

    /// Answer requests whose deadline is at or before `now` with the cached value.
    pub fn expire_overdue(&self, now: R::Instant) -> usize {
        let mut state = self.state.lock();
        let overdue: Vec<RequestId> = state
            .pending
            .iter()
            .filter(|(_, p)| p.deadline.is_some_and(|deadline| deadline <= now))
            .map(|(id, _)| *id)
            .collect();
        if overdue.is_empty() {
            return 0;
        }
        let responders = overdue
            .iter()
            .filter_map(|id| state.pending.remove(id))
            .map(|p| p.responder)
            .collect();
        let batch = Batch {
            value: state.cache.fallback_value(),
            responders,
        };
        state.count_fallbacks(FallbackReason::Timeout, batch.responders.len());
        drop(state);

        let value = batch.value;
        let count = batch.resolve();
        crate::warn!(
            "{}: {}, answered {} request(s) with cached value {}",
            self.host,
            FallbackReason::Timeout,
            count,
            value
        );
        count
    }

    /// Wait `timeout`, then expire whatever is overdue by then.
    pub async fn expire_after(&self, timeout: Duration) -> usize {
        self.timer.sleep_future(timeout).await;
        self.expire_overdue(self.timer.now())
    }

    /// Store `value` as current without adjustment.
    pub fn overwrite(&self, value: f64) -> Reading<R::Instant> {
        self.state.lock().cache.overwrite(value)
    }

    #[must_use]
    pub fn current(&self) -> Option<Reading<R::Instant>> {
        self.state.lock().cache.current()
    }

    #[must_use]
    pub fn fallback_value(&self) -> f64 {
        self.state.lock().cache.fallback_value()
    }

    /// How many requests were answered from the cache for `reason` so far.
    #[must_use]
    pub fn fallback_count(&self, reason: FallbackReason) -> usize {
        self.state
            .lock()
            .fallbacks
            .get(&reason)
            .copied()
            .unwrap_or(0)
    }

    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.state.lock().pending.len()
    }

    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }

    /// Look the device up without classifying it.
    #[must_use]
    pub fn locate(&self) -> Option<Arc<dyn DeviceHandle>> {
        self.locator.locate(&self.host)
    }

    fn fallback(&self, reason: FallbackReason) -> GetOutcome {
        let batch = self.state.lock().take_fallback_batch(reason);
        let value = batch.value;
        batch.resolve();
        GetOutcome::Fallback { value, reason }
    }
}

impl<R: Runtime> Clone for RequestCoalescer<R> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            locator: self.locator.clone(),
            host: self.host.clone(),
            timer: self.timer.clone(),
            request_timeout: self.request_timeout,
        }
    }
}

impl<R: Runtime> fmt::Debug for RequestCoalescer<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestCoalescer")
            .field("host", &self.host)
            .field("pending", &self.pending_len())
            .field("request_timeout", &self.request_timeout)
            .finish_non_exhaustive()
    }
}
