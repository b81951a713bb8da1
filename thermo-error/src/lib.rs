// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]
//! Error types for the thermo sensor cache.
//!
//! Most failure modes of a slow or missing device are *not* errors in thermo: a caller
//! asking for the current temperature always receives a value, real or substituted.
//! [`ThermoError`] covers the remaining conditions that genuinely need reporting:
//! invalid configuration, transport failures raised by a device implementation, and a
//! response channel that was dropped before it could be answered.
//!
//! # Examples
//!
//! ```
//! use thermo_error::{ThermoError, Result};
//!
//! fn check_period(secs: u64) -> Result<()> {
//!     if secs == 0 {
//!         return Err(ThermoError::invalid_config("refresh_period", "must be non-zero"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_period(0).is_err());
//! ```

/// Root error type for all thermo operations
#[derive(Debug, thiserror::Error)]
pub enum ThermoError {
    /// A configuration value is outside its accepted domain
    #[error("Invalid configuration for `{field}`: {reason}")]
    InvalidConfig {
        /// Name of the offending field
        field: String,
        /// Why the value was rejected
        reason: String,
    },

    /// The device transport could not deliver a poll request
    ///
    /// Raised by `DeviceHandle` implementations. The coalescer treats it like an
    /// inactive device.
    #[error("Device transport failed: {context}")]
    Transport {
        /// Description of the failed transport operation
        context: String,
    },

    /// A pending request was dropped before it was answered
    ///
    /// The coalescer resolves every queued request, so this indicates the owning
    /// sensor was torn down while a caller was still waiting.
    #[error("Response dropped before a value was delivered")]
    ResponseDropped,

    /// Custom error from user code
    ///
    /// Wraps errors produced by device implementations (an `io::Error` converts via
    /// `?`). The coalescer adds context with [`ResultExt`], turning it into
    /// [`ThermoError::Transport`].
    #[error("User error: {0}")]
    UserError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ThermoError {
    /// Create a configuration error for the given field
    pub fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a transport error with the given context
    pub fn transport(context: impl Into<String>) -> Self {
        Self::Transport {
            context: context.into(),
        }
    }

    /// Wrap a user error
    pub fn user_error(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::UserError(Box::new(error))
    }
}

/// Specialized Result type for thermo operations
pub type Result<T> = std::result::Result<T, ThermoError>;

/// Helper trait for adding context to `Result`s
///
/// User errors gain the context and become [`ThermoError::Transport`]; all other
/// variants pass through unchanged.
pub trait ResultExt<T> {
    /// Add context to an error
    ///
    /// # Errors
    /// Returns `Err(ThermoError)` if the underlying result is `Err`.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context to an error using a closure (lazy evaluation)
    ///
    /// # Errors
    /// Returns `Err(ThermoError)` if the underlying result is `Err`.
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<ThermoError>,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.with_context(|| context.into())
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| match e.into() {
            ThermoError::UserError(inner) => ThermoError::Transport {
                context: format!("{}: {inner}", f()),
            },
            other => other,
        })
    }
}

impl From<std::io::Error> for ThermoError {
    fn from(error: std::io::Error) -> Self {
        Self::user_error(error)
    }
}
