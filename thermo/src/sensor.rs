// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::sync::Arc;
use thermo_core::{DeviceLocator, Reading, RefreshNotifier, Responder, SensorConfig};
use thermo_error::{Result, ThermoError};
use thermo_exec::{GetOutcome, RefreshScheduler, RequestCoalescer, SchedulerHandle, SchedulerPhase};
use thermo_runtime::{Runtime, TokioRuntime};
use tokio::runtime::Handle;
use tokio::sync::oneshot;

/// One temperature sensor: configuration, coalescer and refresh loop wired together.
///
/// Dropping the sensor stops its refresh loop. Requests already parked stay
/// answerable through their deadline watchdogs.
///
/// The sensor remembers the tokio runtime it was started on, so [`get`](Self::get)
/// may be called from any thread.
pub struct TemperatureSensor<R: Runtime = TokioRuntime> {
    config: SensorConfig,
    coalescer: RequestCoalescer<R>,
    scheduler: SchedulerHandle<R>,
    runtime: Handle,
}

impl TemperatureSensor<TokioRuntime> {
    /// Validate `config` and start the refresh loop on the current tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`ThermoError::InvalidConfig`] if `config` fails validation.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn start(
        config: SensorConfig,
        locator: Arc<dyn DeviceLocator>,
        notifier: Arc<dyn RefreshNotifier>,
    ) -> Result<Self> {
        Self::start_with_runtime(config, locator, notifier)
    }
}

impl<R: Runtime> TemperatureSensor<R> {
    /// Like [`TemperatureSensor::start`], for any runtime abstraction.
    ///
    /// # Errors
    ///
    /// Returns [`ThermoError::InvalidConfig`] if `config` fails validation.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn start_with_runtime(
        config: SensorConfig,
        locator: Arc<dyn DeviceLocator>,
        notifier: Arc<dyn RefreshNotifier>,
    ) -> Result<Self> {
        config.validate()?;
        let runtime = Handle::current();

        let coalescer = RequestCoalescer::<R>::with_runtime(
            config.host.as_str(),
            locator,
            config.value_adjustment,
            config.request_timeout(),
        );
        if let Some(value) = config.fixed_override_value {
            coalescer.overwrite(value);
        }
        let scheduler = RefreshScheduler::new(&config, coalescer.clone(), notifier).spawn();

        #[cfg(feature = "tracing")]
        tracing::info!(
            "{} ({}): started, refresh period {:?}",
            config.name,
            config.host,
            config.refresh_period()
        );

        Ok(Self {
            config,
            coalescer,
            scheduler,
            runtime,
        })
    }

    /// Serve one "give me the current value" request.
    ///
    /// With a fixed override value configured the responder is answered with it at
    /// once. Otherwise the request goes through the coalescer; a parked request gets a
    /// watchdog that answers it from the cache once the request timeout passes.
    pub fn get(&self, responder: Responder) -> GetOutcome {
        if let Some(value) = self.config.fixed_override_value {
            self.coalescer.overwrite(value);
            responder(Ok(value));
            return GetOutcome::Fixed(value);
        }

        // Deadlines and watchdogs must use the sensor's clock, whatever thread calls.
        let _runtime = self.runtime.enter();
        let outcome = self.coalescer.get(responder);
        if let (GetOutcome::Pending(_), Some(timeout)) = (outcome, self.coalescer.request_timeout())
        {
            let coalescer = self.coalescer.clone();
            self.runtime.spawn(async move {
                coalescer.expire_after(timeout).await;
            });
        }
        outcome
    }

    /// The current temperature, waiting for the device if a poll was needed.
    ///
    /// # Errors
    ///
    /// Returns [`ThermoError::ResponseDropped`] if the request was discarded unanswered,
    /// which only happens when the sensor is torn down underneath it.
    pub async fn current_temperature(&self) -> Result<f64> {
        let (tx, rx) = oneshot::channel();
        self.get(Box::new(move |answer: Result<f64>| {
            let _ = tx.send(answer);
        }));
        match rx.await {
            Ok(answer) => answer,
            Err(_) => Err(ThermoError::ResponseDropped),
        }
    }

    /// The cached reading, without consulting the device.
    #[must_use]
    pub fn current_reading(&self) -> Option<Reading<R::Instant>> {
        self.coalescer.current()
    }

    #[must_use]
    pub fn phase(&self) -> SchedulerPhase {
        self.scheduler.phase()
    }

    #[must_use]
    pub const fn config(&self) -> &SensorConfig {
        &self.config
    }

    /// Stop the refresh loop. Reads keep working from the cache and the coalescer.
    pub fn stop(&self) {
        self.scheduler.stop();
    }

    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.scheduler.is_stopped()
    }
}

impl<R: Runtime> core::fmt::Debug for TemperatureSensor<R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TemperatureSensor")
            .field("name", &self.config.name)
            .field("coalescer", &self.coalescer)
            .field("scheduler", &self.scheduler)
            .finish()
    }
}
