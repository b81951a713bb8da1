// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use thermo_core::RefreshNotifier;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio_stream::wrappers::UnboundedReceiverStream;

/// Counts refresh notifications and streams their running number.
pub struct RecordingNotifier {
    count: AtomicUsize,
    tx: UnboundedSender<usize>,
}

impl RecordingNotifier {
    /// The notifier plus a stream yielding `1, 2, 3, ...` as refreshes happen.
    #[must_use]
    pub fn new() -> (Arc<Self>, UnboundedReceiverStream<usize>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let notifier = Arc::new(Self {
            count: AtomicUsize::new(0),
            tx,
        });
        (notifier, UnboundedReceiverStream::new(rx))
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl RefreshNotifier for RecordingNotifier {
    fn refresh(&self) {
        let n = self.count.fetch_add(1, Ordering::SeqCst) + 1;
        let _ = self.tx.send(n);
    }
}
