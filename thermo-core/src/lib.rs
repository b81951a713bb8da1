// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod callbacks;
pub mod cancellation_token;
pub mod config;
pub mod device;
pub mod fallback;
pub mod reading;
pub mod registry;
pub mod sample_cache;
pub mod sample_subject;
pub mod thermo_task;

pub use self::callbacks::{RefreshNotifier, Responder};
pub use self::cancellation_token::CancellationToken;
pub use self::config::SensorConfig;
pub use self::device::{presence, DeviceHandle, DeviceLocator, Presence, SampleStream};
pub use self::fallback::FallbackReason;
pub use self::reading::Reading;
pub use self::registry::DeviceRegistry;
pub use self::sample_cache::SampleCache;
pub use self::sample_subject::SampleSubject;
pub use self::thermo_task::ThermoTask;
pub use thermo_error::{Result, ResultExt, ThermoError};
