// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Per-sensor configuration.
//!
//! [`SensorConfig`] is read-only to the sensor once started. It deserializes from
//! camelCase keys and also accepts the key names used by older accessory configs
//! (`temperatureUpdateFrequency`, `temperatureAdjustment`, `pseudoDeviceTemperature`).
//!
//! ```
//! use std::time::Duration;
//! use thermo_core::SensorConfig;
//!
//! let config = SensorConfig::new("192.168.1.40")
//!     .with_refresh_period(Duration::from_secs(5))
//!     .with_value_adjustment(-2.0);
//!
//! // Refreshes are never more frequent than once a minute.
//! assert_eq!(config.refresh_period(), Duration::from_secs(60));
//! assert!(config.validate().is_ok());
//! ```

use core::time::Duration;
use serde::Deserialize;
use thermo_error::{Result, ThermoError};

/// Lower bound on the refresh period, protecting the device from excessive polling.
pub const MIN_REFRESH_PERIOD: Duration = Duration::from_secs(60);

pub const DEFAULT_REFRESH_PERIOD_SECS: u64 = 10;
pub const DEFAULT_DISCOVERY_BACKOFF_MS: u64 = 1_000;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SensorConfig {
    /// Display name, used in log lines.
    pub name: String,
    /// Address the device is discovered under.
    pub host: String,
    /// Requested refresh period in seconds, fractions allowed; see
    /// [`refresh_period`](Self::refresh_period).
    #[serde(alias = "temperatureUpdateFrequency")]
    pub refresh_period_secs: f64,
    /// Added to every raw device sample.
    #[serde(alias = "temperatureAdjustment")]
    pub value_adjustment: f64,
    /// When set, every read answers this value and the device is never consulted.
    #[serde(alias = "pseudoDeviceTemperature")]
    pub fixed_override_value: Option<f64>,
    /// Deadline for a pending request; `None` waits for the device indefinitely.
    pub request_timeout_secs: Option<u64>,
    /// Delay between discovery attempts while the device is missing.
    pub discovery_backoff_ms: u64,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            name: "Temperature Sensor".to_string(),
            host: String::new(),
            refresh_period_secs: DEFAULT_REFRESH_PERIOD_SECS as f64,
            value_adjustment: 0.0,
            fixed_override_value: None,
            request_timeout_secs: Some(DEFAULT_REQUEST_TIMEOUT_SECS),
            discovery_backoff_ms: DEFAULT_DISCOVERY_BACKOFF_MS,
        }
    }
}

impl SensorConfig {
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_refresh_period(mut self, period: Duration) -> Self {
        self.refresh_period_secs = period.as_secs_f64();
        self
    }

    #[must_use]
    pub const fn with_value_adjustment(mut self, adjustment: f64) -> Self {
        self.value_adjustment = adjustment;
        self
    }

    #[must_use]
    pub const fn with_fixed_override_value(mut self, value: Option<f64>) -> Self {
        self.fixed_override_value = value;
        self
    }

    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout_secs = timeout.map(|t| t.as_secs());
        self
    }

    #[must_use]
    pub fn with_discovery_backoff(mut self, backoff: Duration) -> Self {
        self.discovery_backoff_ms = u64::try_from(backoff.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Effective refresh period.
    ///
    /// A zero or unrepresentable period falls back to the default before the
    /// [`MIN_REFRESH_PERIOD`] floor is applied, so the result is never below one minute.
    #[must_use]
    pub fn refresh_period(&self) -> Duration {
        Duration::try_from_secs_f64(self.refresh_period_secs)
            .ok()
            .filter(|period| !period.is_zero())
            .unwrap_or(Duration::from_secs(DEFAULT_REFRESH_PERIOD_SECS))
            .max(MIN_REFRESH_PERIOD)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    #[must_use]
    pub const fn discovery_backoff(&self) -> Duration {
        Duration::from_millis(self.discovery_backoff_ms)
    }

    /// Reject values the sensor cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`ThermoError::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if !(self.refresh_period_secs.is_finite() && self.refresh_period_secs >= 0.0) {
            return Err(ThermoError::invalid_config(
                "refresh_period_secs",
                "must be a finite, non-negative number of seconds",
            ));
        }
        if !self.value_adjustment.is_finite() {
            return Err(ThermoError::invalid_config(
                "value_adjustment",
                "must be a finite number",
            ));
        }
        if let Some(value) = self.fixed_override_value {
            if !value.is_finite() {
                return Err(ThermoError::invalid_config(
                    "fixed_override_value",
                    "must be a finite number",
                ));
            }
        }
        if self.request_timeout_secs == Some(0) {
            return Err(ThermoError::invalid_config(
                "request_timeout_secs",
                "must be at least one second; omit it to wait indefinitely",
            ));
        }
        if self.discovery_backoff_ms == 0 {
            return Err(ThermoError::invalid_config(
                "discovery_backoff_ms",
                "must be non-zero",
            ));
        }
        Ok(())
    }
}
