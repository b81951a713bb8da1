// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use thermo_core::{RefreshNotifier, ThermoError};
use thermo_test_utils::{
    assert_no_element_emitted, unwrap_stream, MockDevice, RecordingNotifier, ResponseLog,
};

#[tokio::test]
async fn test_assert_no_element_emitted() {
    let device = MockDevice::new();
    let mut samples = thermo_core::DeviceHandle::samples(&device);

    // Nothing is published
    assert_no_element_emitted(&mut samples, 100).await;
}

#[tokio::test]
#[should_panic = "Timeout: No item received within 100 ms"]
async fn test_unwrap_stream_timeout() {
    let (_notifier, mut refreshes) = RecordingNotifier::new();

    unwrap_stream(&mut refreshes, 100).await;
}

#[tokio::test]
async fn test_recording_notifier_counts() {
    let (notifier, mut refreshes) = RecordingNotifier::new();

    notifier.refresh();
    notifier.refresh();

    assert_eq!(notifier.count(), 2);
    assert_eq!(unwrap_stream(&mut refreshes, 100).await, 1);
    assert_eq!(unwrap_stream(&mut refreshes, 100).await, 2);
}

#[test]
fn test_response_log_keeps_answer_order() {
    let log = ResponseLog::new();
    let a = log.responder(0);
    let b = log.responder(1);
    let c = log.responder(2);

    c(Ok(3.0));
    a(Ok(1.0));
    b(Ok(2.0));

    assert_eq!(log.tags(), vec![2, 0, 1]);
    assert_eq!(log.values(), vec![3.0, 1.0, 2.0]);
    assert_eq!(log.times_answered(0), 1);
}

#[test]
#[should_panic = "request 4 was answered with an error"]
fn test_response_log_rejects_error_answers() {
    let log = ResponseLog::new();
    log.responder(4)(Err(ThermoError::ResponseDropped));

    let _ = log.values();
}
