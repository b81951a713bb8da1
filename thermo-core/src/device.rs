// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Seams to the device layer.
//!
//! A device is an opaque capability: it can be asked for a sample, it announces
//! samples on an event stream, and it can say whether it is operational. Nothing in
//! thermo ever expects a poll to return a value synchronously.

use core::pin::Pin;
use futures::Stream;
use std::sync::Arc;
use thermo_error::Result;

/// Stream of raw samples announced by a device.
pub type SampleStream = Pin<Box<dyn Stream<Item = f64> + Send + 'static>>;

/// A slow, event-driven sampling device.
pub trait DeviceHandle: Send + Sync {
    /// Ask the device to take a sample.
    ///
    /// Fire-and-forget: the answer, if any, arrives later on [`samples`](Self::samples).
    /// Re-triggering while a poll is outstanding must be harmless.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport could not send the request at all.
    fn request_sample(&self) -> Result<()>;

    /// `false` when the device is known but not operational.
    fn is_available(&self) -> bool;

    /// Subscribe to the samples this device announces from now on.
    fn samples(&self) -> SampleStream;
}

/// Resolves a host address to a device, if one is currently known.
pub trait DeviceLocator: Send + Sync {
    fn locate(&self, host: &str) -> Option<Arc<dyn DeviceHandle>>;
}

impl<F> DeviceLocator for F
where
    F: Fn(&str) -> Option<Arc<dyn DeviceHandle>> + Send + Sync,
{
    fn locate(&self, host: &str) -> Option<Arc<dyn DeviceHandle>> {
        self(host)
    }
}

/// Outcome of looking a device up right before a poll decision.
pub enum Presence {
    Absent,
    Inactive,
    Ready(Arc<dyn DeviceHandle>),
}

impl core::fmt::Debug for Presence {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Absent => f.write_str("Absent"),
            Self::Inactive => f.write_str("Inactive"),
            Self::Ready(_) => f.write_str("Ready"),
        }
    }
}

/// Look the device up and classify its availability.
pub fn presence(locator: &dyn DeviceLocator, host: &str) -> Presence {
    match locator.locate(host) {
        None => Presence::Absent,
        Some(device) if !device.is_available() => Presence::Inactive,
        Some(device) => Presence::Ready(device),
    }
}
