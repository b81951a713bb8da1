// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # Thermo
//!
//! A read-coalescing cache in front of a slow temperature sensor.
//!
//! ## Overview
//!
//! Devices answer a poll with a later event, not a return value, and they may vanish
//! at any time. Thermo hides both: any number of concurrent readers share one device
//! poll, a reader is always answered (with the real sample, or the last known value
//! when the device cannot deliver), and a background task keeps reconnecting and
//! nudging the host to re-read on a fixed period.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use thermo::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> thermo::Result<()> {
//!     // Discovery code fills the registry as devices show up
//!     let registry = DeviceRegistry::new();
//!
//!     let config = SensorConfig::new("192.168.1.40").with_value_adjustment(-1.5);
//!     let sensor = TemperatureSensor::start(config, Arc::new(registry), Arc::new(|| {
//!         // republish the value in the UI
//!     }))?;
//!
//!     let celsius = sensor.current_temperature().await?;
//!     println!("{celsius:.1} °C");
//!     Ok(())
//! }
//! ```

pub mod sensor;

pub use sensor::TemperatureSensor;
pub use thermo_core::{
    DeviceHandle, DeviceLocator, DeviceRegistry, FallbackReason, Reading, RefreshNotifier,
    Responder, SampleStream, SampleSubject, SensorConfig,
};
pub use thermo_error::{Result, ThermoError};
pub use thermo_exec::{GetOutcome, RequestCoalescer, RequestId, SchedulerPhase};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::TemperatureSensor;
    pub use thermo_core::{
        DeviceHandle, DeviceLocator, DeviceRegistry, RefreshNotifier, SensorConfig,
    };
    pub use thermo_exec::GetOutcome;
}
