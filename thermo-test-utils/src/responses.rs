// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use parking_lot::Mutex;
use std::sync::Arc;
use thermo_core::{Responder, Result};

/// Ordered record of answered requests.
///
/// Each entry is the responder's tag together with what it was answered with.
#[derive(Clone, Default)]
pub struct ResponseLog {
    entries: Arc<Mutex<Vec<(usize, Result<f64>)>>>,
}

impl ResponseLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A responder that appends `(tag, answer)` when invoked.
    #[must_use]
    pub fn responder(&self, tag: usize) -> Responder {
        let entries = self.entries.clone();
        Box::new(move |answer: Result<f64>| entries.lock().push((tag, answer)))
    }

    /// Tags in the order their responders ran.
    #[must_use]
    pub fn tags(&self) -> Vec<usize> {
        self.entries.lock().iter().map(|(tag, _)| *tag).collect()
    }

    /// Values in answer order. Panics on an error answer.
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.entries
            .lock()
            .iter()
            .map(|(tag, answer)| match answer {
                Ok(value) => *value,
                Err(e) => panic!("request {tag} was answered with an error: {e}"),
            })
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// How many times `tag` was answered.
    #[must_use]
    pub fn times_answered(&self, tag: usize) -> usize {
        self.entries.lock().iter().filter(|(t, _)| *t == tag).count()
    }
}
