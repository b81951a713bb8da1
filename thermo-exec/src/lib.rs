// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

pub mod coalescer;
mod logging;
pub mod scheduler;

pub use coalescer::{GetOutcome, RequestCoalescer, RequestId};
pub use scheduler::{RefreshScheduler, SchedulerHandle, SchedulerPhase};
pub use thermo_core::{RefreshNotifier, Responder};
