// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::time::Duration;
use thermo_runtime::{MutexLike, Runtime, Timer, TokioRuntime, TokioTimer};

#[tokio::test(start_paused = true)]
async fn test_sleep_future_advances_paused_clock() {
    let timer = TokioTimer;
    let start = timer.now();

    timer.sleep_future(Duration::from_secs(60)).await;

    assert_eq!(timer.now() - start, Duration::from_secs(60));
}

#[tokio::test(start_paused = true)]
async fn test_until_counts_down_and_saturates() {
    let timer = TokioTimer;
    let deadline = timer.now() + Duration::from_secs(5);

    assert_eq!(timer.until(deadline), Duration::from_secs(5));

    timer.sleep_future(Duration::from_secs(3)).await;
    assert_eq!(timer.until(deadline), Duration::from_secs(2));

    timer.sleep_future(Duration::from_secs(10)).await;
    assert_eq!(timer.until(deadline), Duration::ZERO);
}

type SharedVec = <TokioRuntime as Runtime>::Mutex<Vec<u32>>;

#[test]
fn test_runtime_mutex_clones_share_state() {
    let mutex = <SharedVec as MutexLike<Vec<u32>>>::new(Vec::new());
    let clone = mutex.clone();

    clone.lock().push(7);
    mutex.lock().push(9);

    assert_eq!(*mutex.lock(), vec![7, 9]);
}

fn deadline_after<R: Runtime>(timer: &R::Timer, timeout: Duration) -> R::Instant {
    timer.now() + timeout
}

#[tokio::test(start_paused = true)]
async fn test_runtime_instant_supports_deadline_arithmetic() {
    let timer = TokioTimer;
    let start = timer.now();

    let deadline = deadline_after::<TokioRuntime>(&timer, Duration::from_secs(10));
    timer.sleep_future(Duration::from_secs(4)).await;

    assert_eq!(deadline - start, Duration::from_secs(10));
    assert_eq!(deadline - timer.now(), Duration::from_secs(6));
}
