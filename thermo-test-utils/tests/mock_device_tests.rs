// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::sync::Arc;
use thermo_core::{DeviceHandle, DeviceLocator, ThermoError};
use thermo_test_utils::{mock_registry, unwrap_stream, MockDevice};

#[test]
fn test_polls_are_counted() {
    let device = MockDevice::new();

    device.request_sample().unwrap();
    device.request_sample().unwrap();
    device.request_sample().unwrap();

    assert_eq!(device.polls(), 3);
}

#[test]
fn test_failing_poll_is_not_counted() {
    let device = MockDevice::new();
    device.set_failing(true);

    let err = device.request_sample().unwrap_err();

    assert!(matches!(err, ThermoError::UserError(_)));
    assert!(err.to_string().contains("mock device refused the poll"));
    assert_eq!(device.polls(), 0);
}

#[test]
fn test_availability_toggles() {
    let device = MockDevice::new();
    assert!(device.is_available());

    device.set_available(false);
    assert!(!device.is_available());

    device.set_available(true);
    assert!(device.is_available());
}

#[tokio::test]
async fn test_emit_reaches_subscribers() {
    let device = MockDevice::new();
    let mut first = device.samples();
    let mut second = device.samples();

    assert_eq!(device.emit(19.5), 2);

    assert_eq!(unwrap_stream(&mut first, 100).await, 19.5);
    assert_eq!(unwrap_stream(&mut second, 100).await, 19.5);
}

#[tokio::test]
async fn test_auto_reply_publishes_on_poll() {
    let device = MockDevice::new().with_auto_reply(22.0);
    let mut samples = device.samples();

    device.request_sample().unwrap();

    assert_eq!(unwrap_stream(&mut samples, 100).await, 22.0);
}

#[tokio::test]
#[should_panic = "Expected an item but stream ended"]
async fn test_close_ends_sample_streams() {
    let device = MockDevice::new();
    let mut samples = device.samples();

    device.close();

    unwrap_stream(&mut samples, 100).await;
}

#[test]
fn test_mock_registry_locates_device() {
    let device = Arc::new(MockDevice::new());
    let registry = mock_registry("10.0.0.7", device);

    assert!(registry.locate("10.0.0.7").is_some());
    assert!(registry.locate("10.0.0.8").is_none());
}
