// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Hot, multi-subscriber broadcast for device announcements.
//!
//! Device implementations use a [`SampleSubject`] to back
//! [`DeviceHandle::samples`](crate::DeviceHandle::samples).
//!
//! ## Characteristics
//!
//! - **Hot**: late subscribers only see values published after subscribing.
//! - **Unbounded**: no backpressure; a slow subscriber buffers.
//! - **Shared**: clones publish to the same set of subscribers.
//! - **Closable**: closing ends every subscriber stream, which sensors treat as
//!   device loss.
//!
//! ## Example
//!
//! ```
//! use thermo_core::SampleSubject;
//! use futures::StreamExt;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let subject = SampleSubject::<f64>::new();
//! let mut samples = subject.subscribe();
//!
//! subject.publish(21.5);
//! subject.close();
//!
//! assert_eq!(samples.next().await, Some(21.5));
//! assert_eq!(samples.next().await, None);
//! # }
//! ```

use core::pin::Pin;
use futures::channel::mpsc::{self, UnboundedSender};
use futures::{stream, Stream};
use parking_lot::Mutex;
use std::sync::Arc;

type SubjectBoxStream<T> = Pin<Box<dyn Stream<Item = T> + Send + 'static>>;

struct SubjectState<T> {
    closed: bool,
    senders: Vec<UnboundedSender<T>>,
}

pub struct SampleSubject<T: Clone + Send + 'static> {
    state: Arc<Mutex<SubjectState<T>>>,
}

impl<T: Clone + Send + 'static> SampleSubject<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(SubjectState {
                closed: false,
                senders: Vec::new(),
            })),
        }
    }

    /// Subscribe to future values. A closed subject yields an already-ended stream.
    pub fn subscribe(&self) -> SubjectBoxStream<T> {
        let mut state = self.state.lock();
        if state.closed {
            return Box::pin(stream::empty());
        }

        let (tx, rx) = mpsc::unbounded();
        state.senders.push(tx);
        Box::pin(rx)
    }

    /// Send `value` to every live subscriber and return how many received it.
    ///
    /// Subscribers whose stream was dropped are pruned here.
    pub fn publish(&self, value: T) -> usize {
        let mut state = self.state.lock();
        if state.closed {
            return 0;
        }

        state
            .senders
            .retain(|tx| tx.unbounded_send(value.clone()).is_ok());
        state.senders.len()
    }

    /// End every subscriber stream. Idempotent.
    pub fn close(&self) {
        let mut state = self.state.lock();
        state.closed = true;
        state.senders.clear();
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    /// Number of subscribers seen alive at the last publish.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.state.lock().senders.len()
    }
}

impl<T: Clone + Send + 'static> Default for SampleSubject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + 'static> Clone for SampleSubject<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}
