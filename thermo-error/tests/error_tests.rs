// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::io;
use thermo_error::{Result, ResultExt, ThermoError};

#[test]
fn test_error_display() {
    let err = ThermoError::invalid_config("refresh_period", "must be finite");
    assert_eq!(
        err.to_string(),
        "Invalid configuration for `refresh_period`: must be finite"
    );

    let err = ThermoError::transport("poll frame rejected");
    assert_eq!(err.to_string(), "Device transport failed: poll frame rejected");

    let err = ThermoError::ResponseDropped;
    assert_eq!(
        err.to_string(),
        "Response dropped before a value was delivered"
    );
}

#[test]
fn test_error_constructors() {
    let err = ThermoError::invalid_config("value_adjustment", "NaN");
    assert!(matches!(err, ThermoError::InvalidConfig { .. }));

    let err = ThermoError::transport("socket closed");
    assert!(matches!(err, ThermoError::Transport { .. }));

    let err = ThermoError::user_error(io::Error::other("broken pipe"));
    assert!(matches!(err, ThermoError::UserError(_)));

    let err = ThermoError::from(io::Error::other("broken pipe"));
    assert!(matches!(err, ThermoError::UserError(_)));
}

#[test]
fn test_result_context_wraps_user_error() {
    let result: Result<()> = Err(ThermoError::UserError("udp send failed".into()));

    let err = result.context("requesting sample").unwrap_err();

    assert!(matches!(err, ThermoError::Transport { .. }));
    assert!(err.to_string().contains("requesting sample"));
    assert!(err.to_string().contains("udp send failed"));
}

#[test]
fn test_result_context_keeps_other_variants() {
    let result: Result<()> = Err(ThermoError::ResponseDropped);

    let err = result.with_context(|| "awaiting response".to_string()).unwrap_err();

    assert!(matches!(err, ThermoError::ResponseDropped));
}

#[test]
fn test_io_error_converts_with_context() {
    let result: std::result::Result<(), io::Error> =
        Err(io::Error::new(io::ErrorKind::TimedOut, "no ack"));

    let err = result.context("host 10.0.0.5").unwrap_err();

    assert!(matches!(err, ThermoError::Transport { .. }));
    assert!(err.to_string().contains("host 10.0.0.5: no ack"));
}

#[test]
fn test_ok_passes_through_context() {
    let result: Result<u8> = Ok(7);
    assert_eq!(result.context("unused").unwrap(), 7);
}
