// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::time::Duration;
use thermo_core::SampleCache;
use thermo_runtime::{Timer, TokioTimer};

#[test]
fn test_new_cache_is_empty_and_falls_back_to_zero() {
    let cache = SampleCache::new(0.0, TokioTimer);

    assert!(cache.current().is_none());
    assert_eq!(cache.fallback_value(), 0.0);
}

#[test]
fn test_record_applies_negative_adjustment() {
    // Arrange
    let mut cache = SampleCache::new(-2.0, TokioTimer);

    // Act
    let reading = cache.record(21.5);

    // Assert
    assert_eq!(reading.value, 19.5);
    assert_eq!(cache.current().map(|r| r.value), Some(19.5));
    assert_eq!(cache.fallback_value(), 19.5);
}

#[test]
fn test_record_without_adjustment_stores_raw_value() {
    let mut cache = SampleCache::new(0.0, TokioTimer);

    assert_eq!(cache.record(18.25).value, 18.25);
    assert_eq!(cache.adjustment(), 0.0);
}

#[test]
fn test_record_overwrites_previous_reading() {
    let mut cache = SampleCache::new(1.0, TokioTimer);

    cache.record(20.0);
    cache.record(22.0);

    assert_eq!(cache.fallback_value(), 23.0);
}

#[test]
fn test_overwrite_bypasses_adjustment() {
    let mut cache = SampleCache::new(-2.0, TokioTimer);

    let reading = cache.overwrite(17.0);

    assert_eq!(reading.value, 17.0);
    assert_eq!(cache.fallback_value(), 17.0);
}

#[tokio::test(start_paused = true)]
async fn test_reading_is_stamped_with_acceptance_time() {
    let timer = TokioTimer;
    let mut cache = SampleCache::new(0.0, timer.clone());

    let first = cache.record(20.0);
    timer.sleep_future(Duration::from_secs(90)).await;
    let second = cache.record(21.0);

    assert_eq!(second.accepted_at - first.accepted_at, Duration::from_secs(90));
    assert_eq!(cache.current(), Some(second));
}
