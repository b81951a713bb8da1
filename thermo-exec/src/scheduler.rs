// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Background refresh loop.
//!
//! [`RefreshScheduler`] starts in [`SchedulerPhase::Discovering`], retrying the device
//! lookup every discovery backoff until the device shows up. It then subscribes to the
//! device's samples, primes it with one poll, emits one refresh notification and
//! moves to [`SchedulerPhase::Monitoring`] for the rest of its life.
//!
//! While monitoring it
//! - forwards every announced sample to [`RequestCoalescer::on_sample`],
//! - emits a refresh notification every refresh period, whatever the device state,
//! - re-subscribes on a tick after the sample stream ended (device lost).
//!
//! The refresh notification does not poll the device by itself; whoever listens
//! re-reads through the coalescer, which decides whether a poll is needed.

use crate::RequestCoalescer;
use core::time::Duration;
use futures::StreamExt;
use std::sync::Arc;
use thermo_core::{
    CancellationToken, DeviceHandle, RefreshNotifier, ResultExt, SampleStream, SensorConfig,
    ThermoTask,
};
use thermo_runtime::{MutexLike, Runtime, Timer, TokioRuntime};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerPhase {
    Discovering,
    Monitoring,
}

pub struct RefreshScheduler<R: Runtime = TokioRuntime> {
    coalescer: RequestCoalescer<R>,
    notifier: Arc<dyn RefreshNotifier>,
    refresh_period: Duration,
    discovery_backoff: Duration,
    timer: R::Timer,
    phase: R::Mutex<SchedulerPhase>,
}

impl<R: Runtime> RefreshScheduler<R> {
    /// Periods are taken from `config`; the refresh period is already floored there.
    pub fn new(
        config: &SensorConfig,
        coalescer: RequestCoalescer<R>,
        notifier: Arc<dyn RefreshNotifier>,
    ) -> Self {
        Self {
            coalescer,
            notifier,
            refresh_period: config.refresh_period(),
            discovery_backoff: config.discovery_backoff(),
            timer: R::Timer::default(),
            phase: <R::Mutex<SchedulerPhase> as MutexLike<_>>::new(SchedulerPhase::Discovering),
        }
    }

    #[must_use]
    pub const fn refresh_period(&self) -> Duration {
        self.refresh_period
    }

    #[must_use]
    pub fn phase(&self) -> SchedulerPhase {
        *self.phase.lock()
    }

    /// Run the loop on the current tokio runtime until the handle is dropped.
    pub fn spawn(self) -> SchedulerHandle<R> {
        let phase = self.phase.clone();
        let task = ThermoTask::spawn(move |cancel| self.run(cancel));
        SchedulerHandle { task, phase }
    }

    /// Drive discovery and monitoring until `cancel` fires.
    pub async fn run(self, cancel: CancellationToken) {
        let Some(stream) = self.discover(&cancel).await else {
            return;
        };
        let mut samples = Some(stream);
        self.set_phase(SchedulerPhase::Monitoring);
        crate::info!(
            "{}: monitoring, refreshing every {:?}",
            self.coalescer.host(),
            self.refresh_period
        );

        let mut next_tick = self.timer.now() + self.refresh_period;
        loop {
            let tick = self.timer.sleep_future(self.timer.until(next_tick));
            tokio::select! {
                biased;
                () = cancel.cancelled() => break,
                sample = next_sample(&mut samples) => match sample {
                    Some(raw) => {
                        self.coalescer.on_sample(raw);
                    }
                    None => {
                        crate::warn!(
                            "{}: sample stream ended, will look for the device on the next tick",
                            self.coalescer.host()
                        );
                        samples = None;
                    }
                },
                () = tick => {
                    next_tick = self.timer.now() + self.refresh_period;
                    if samples.is_none() {
                        samples = self.coalescer.locate().map(|device| self.attach(&*device));
                    }
                    self.notifier.refresh();
                }
            }
        }
        crate::debug!("{}: refresh loop stopped", self.coalescer.host());
    }

    async fn discover(&self, cancel: &CancellationToken) -> Option<SampleStream> {
        loop {
            if let Some(device) = self.coalescer.locate() {
                crate::info!("{}: device found", self.coalescer.host());
                let samples = self.attach(&*device);
                self.notifier.refresh();
                return Some(samples);
            }

            crate::debug!(
                "{}: no device yet, retrying in {:?}",
                self.coalescer.host(),
                self.discovery_backoff
            );
            tokio::select! {
                biased;
                () = cancel.cancelled() => return None,
                () = self.timer.sleep_future(self.discovery_backoff) => {}
            }
        }
    }

    /// Subscribe first so the priming sample cannot be missed.
    fn attach(&self, device: &dyn DeviceHandle) -> SampleStream {
        let samples = device.samples();
        if let Err(error) = device.request_sample().context("priming sample request") {
            crate::warn!("{}: {}", self.coalescer.host(), error);
        }
        samples
    }

    fn set_phase(&self, phase: SchedulerPhase) {
        *self.phase.lock() = phase;
    }
}

/// Next raw sample; `None` once the stream ended. Never resolves without a stream.
async fn next_sample(samples: &mut Option<SampleStream>) -> Option<f64> {
    match samples {
        Some(stream) => stream.next().await,
        None => futures::future::pending().await,
    }
}

/// Owns a running [`RefreshScheduler`]; dropping it stops the loop.
pub struct SchedulerHandle<R: Runtime = TokioRuntime> {
    task: ThermoTask,
    phase: R::Mutex<SchedulerPhase>,
}

impl<R: Runtime> SchedulerHandle<R> {
    #[must_use]
    pub fn phase(&self) -> SchedulerPhase {
        *self.phase.lock()
    }

    pub fn stop(&self) {
        self.task.cancel();
    }

    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.task.is_cancelled()
    }
}

impl<R: Runtime> core::fmt::Debug for SchedulerHandle<R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SchedulerHandle")
            .field("phase", &self.phase())
            .field("stopped", &self.is_stopped())
            .finish()
    }
}
