// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::fmt;

/// Why a request was answered with the cached value instead of a fresh sample.
///
/// None of these are errors: callers always receive a value. They are reported
/// for logging and for callers that want to know how fresh their answer is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FallbackReason {
    /// No device is registered for the configured host.
    DeviceAbsent,
    /// The device exists but reports itself as not operational.
    DeviceInactive,
    /// The previous batch never saw a sample before the next request arrived.
    StaleBatch,
    /// The device rejected the poll request.
    TransportFailed,
    /// The request outlived its deadline.
    Timeout,
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::DeviceAbsent => "device absent",
            Self::DeviceInactive => "device inactive",
            Self::StaleBatch => "stale batch",
            Self::TransportFailed => "transport failed",
            Self::Timeout => "request timed out",
        };
        f.write_str(text)
    }
}
