// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Scriptable device for exercising coalescing and scheduling.

use parking_lot::Mutex;
use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use thermo_core::{DeviceHandle, DeviceRegistry, Result, SampleStream, SampleSubject};

/// A device driven entirely by the test.
///
/// Every successful [`request_sample`](DeviceHandle::request_sample) is counted. With
/// [`with_auto_reply`](Self::with_auto_reply) the device also announces a sample on
/// every poll, like a responsive sensor would a little later.
pub struct MockDevice {
    polls: AtomicUsize,
    available: AtomicBool,
    failing: AtomicBool,
    auto_reply: Mutex<Option<f64>>,
    subject: SampleSubject<f64>,
}

impl MockDevice {
    #[must_use]
    pub fn new() -> Self {
        Self {
            polls: AtomicUsize::new(0),
            available: AtomicBool::new(true),
            failing: AtomicBool::new(false),
            auto_reply: Mutex::new(None),
            subject: SampleSubject::new(),
        }
    }

    /// Announce `raw` on every accepted poll.
    #[must_use]
    pub fn with_auto_reply(self, raw: f64) -> Self {
        *self.auto_reply.lock() = Some(raw);
        self
    }

    pub fn set_auto_reply(&self, raw: Option<f64>) {
        *self.auto_reply.lock() = raw;
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Make subsequent polls fail at the transport.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of polls accepted so far.
    #[must_use]
    pub fn polls(&self) -> usize {
        self.polls.load(Ordering::SeqCst)
    }

    /// Announce a raw sample to every subscriber; returns how many received it.
    pub fn emit(&self, raw: f64) -> usize {
        self.subject.publish(raw)
    }

    /// End every sample stream, as if the device went away.
    pub fn close(&self) {
        self.subject.close();
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subject.subscriber_count()
    }
}

impl Default for MockDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceHandle for MockDevice {
    fn request_sample(&self) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "mock device refused the poll",
            )
            .into());
        }
        self.polls.fetch_add(1, Ordering::SeqCst);
        if let Some(raw) = *self.auto_reply.lock() {
            self.subject.publish(raw);
        }
        Ok(())
    }

    fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    fn samples(&self) -> SampleStream {
        self.subject.subscribe()
    }
}

/// Registry holding `device` under `host`.
pub fn mock_registry(host: &str, device: Arc<MockDevice>) -> DeviceRegistry {
    let registry = DeviceRegistry::new();
    registry.register(host, device);
    registry
}
