// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

/// A value accepted as current, stamped with the instant it was accepted.
///
/// Readings are replaced as a whole; there is no partial update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading<I> {
    pub value: f64,
    pub accepted_at: I,
}

impl<I> Reading<I> {
    pub const fn new(value: f64, accepted_at: I) -> Self {
        Self { value, accepted_at }
    }
}
