// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Runtime seams used by the coalescer and the refresh scheduler.
//!
//! Everything time- or lock-related goes through [`runtime::Runtime`], so the core
//! state machine never names tokio or parking_lot directly.

pub mod impls;
pub mod mutex;
pub mod runtime;
pub mod timer;

pub use self::mutex::MutexLike;
pub use self::runtime::Runtime;
pub use self::timer::Timer;

#[cfg(feature = "runtime-tokio")]
pub use self::impls::tokio::{TokioRuntime, TokioTimer};
