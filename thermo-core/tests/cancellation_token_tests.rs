// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thermo_core::{CancellationToken, ThermoTask};

#[test]
fn test_new_token_not_cancelled() {
    let token = CancellationToken::new();
    assert!(!token.is_cancelled());
}

#[test]
fn test_cancel_is_idempotent_and_shared_by_clones() {
    let token = CancellationToken::new();
    let clone = token.clone();

    clone.cancel();
    clone.cancel();

    assert!(token.is_cancelled());
}

#[tokio::test]
async fn test_cancelled_resolves_immediately_if_already_cancelled() {
    let token = CancellationToken::new();
    token.cancel();

    token.cancelled().await;
}

#[tokio::test]
async fn test_cancelled_wakes_all_waiters() {
    let token = CancellationToken::new();
    let woken = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..3)
        .map(|_| {
            let token = token.clone();
            let woken = woken.clone();
            tokio::spawn(async move {
                token.cancelled().await;
                woken.fetch_add(1, Ordering::SeqCst);
            })
        })
        .collect();

    tokio::time::sleep(Duration::from_millis(10)).await;
    token.cancel();

    for handle in handles {
        handle.await.unwrap();
    }
    assert_eq!(woken.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_task_is_cancelled_on_drop() {
    let (done_tx, done_rx) = tokio::sync::oneshot::channel();

    let task = ThermoTask::spawn(|cancel| async move {
        cancel.cancelled().await;
        let _ = done_tx.send(());
    });
    assert!(!task.is_cancelled());

    drop(task);

    tokio::time::timeout(Duration::from_secs(1), done_rx)
        .await
        .expect("task should observe cancellation")
        .unwrap();
}

#[tokio::test]
async fn test_task_cancel_without_drop() {
    let task = ThermoTask::spawn(|cancel| async move {
        cancel.cancelled().await;
    });

    task.cancel();

    assert!(task.is_cancelled());
}
