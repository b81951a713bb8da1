// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities and fixtures for the thermo sensor cache.
//!
//! This crate is for development and testing only. It provides a scriptable device,
//! a notifier that records refreshes, a responder factory that records answers in
//! order, and a few stream assertions.
//!
//! # Key Types
//!
//! ## `MockDevice`
//!
//! A [`DeviceHandle`](thermo_core::DeviceHandle) whose availability and transport
//! failures are switched from the test, and whose samples are pushed by hand:
//!
//! ```rust
//! use thermo_core::DeviceHandle;
//! use thermo_test_utils::MockDevice;
//!
//! let device = MockDevice::new();
//! device.request_sample().unwrap();
//! device.request_sample().unwrap();
//! assert_eq!(device.polls(), 2);
//!
//! device.set_available(false);
//! assert!(!device.is_available());
//! ```
//!
//! ## `ResponseLog`
//!
//! Hands out tagged responders and remembers the order they were invoked in:
//!
//! ```rust
//! use thermo_test_utils::ResponseLog;
//!
//! let log = ResponseLog::new();
//! let first = log.responder(1);
//! let second = log.responder(2);
//!
//! second(Ok(20.0));
//! first(Ok(21.0));
//!
//! assert_eq!(log.tags(), vec![2, 1]);
//! assert_eq!(log.values(), vec![20.0, 21.0]);
//! ```

pub mod helpers;
pub mod mock_device;
pub mod notifier;
pub mod responses;

pub use self::helpers::{assert_no_element_emitted, settle, unwrap_stream};
pub use self::mock_device::{mock_registry, MockDevice};
pub use self::notifier::RecordingNotifier;
pub use self::responses::ResponseLog;
