// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Background task handle with cancellation on drop.

use crate::CancellationToken;
use core::future::Future;

/// Owns a spawned tokio task through its [`CancellationToken`].
///
/// The spawned future receives the token and is expected to exit once it fires.
/// Dropping the `ThermoTask` (or calling [`cancel`](Self::cancel)) signals it.
///
/// # Example
///
/// ```rust
/// use thermo_core::ThermoTask;
///
/// # #[tokio::main]
/// # async fn main() {
/// let task = ThermoTask::spawn(|cancel| async move {
///     cancel.cancelled().await;
/// });
///
/// assert!(!task.is_cancelled());
/// drop(task);
/// # }
/// ```
#[derive(Debug)]
pub struct ThermoTask {
    cancel: CancellationToken,
}

impl ThermoTask {
    /// Spawn `f(token)` on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn spawn<F, Fut>(f: F) -> Self
    where
        F: FnOnce(CancellationToken) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let cancel = CancellationToken::new();
        tokio::spawn(f(cancel.clone()));
        Self { cancel }
    }

    /// Signal the task to stop without waiting for it.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Drop for ThermoTask {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
