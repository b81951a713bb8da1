// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{mutex::MutexLike, timer::Timer};
use core::fmt::Debug;
use core::ops::{Add, Sub};
use core::time::Duration;

pub trait Runtime: Send + Sync + 'static {
    type Mutex<T: Send + 'static>: MutexLike<T> + 'static;
    type Timer: Timer<Instant = Self::Instant> + Default;
    type Instant: Copy
        + Ord
        + Send
        + Sync
        + Debug
        + 'static
        + Add<Duration, Output = Self::Instant>
        + Sub<Self::Instant, Output = Duration>;
}
