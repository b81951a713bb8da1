// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Caller-facing continuations.

use thermo_error::Result;

/// Continuation for a single "give me the current value" request.
///
/// Invoked exactly once. The error slot is never used by the coalescer; it exists so
/// hosts can route the answer straight into their own callback conventions.
pub type Responder = Box<dyn FnOnce(Result<f64>) + Send + 'static>;

/// Outward "re-read and republish the current value now" signal.
pub trait RefreshNotifier: Send + Sync {
    fn refresh(&self);
}

impl<F> RefreshNotifier for F
where
    F: Fn() + Send + Sync,
{
    fn refresh(&self) {
        self();
    }
}
