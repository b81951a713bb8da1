// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thermo_core::{presence, DeviceHandle, DeviceLocator, DeviceRegistry, Presence, SampleStream, SampleSubject};

struct FixedDevice {
    available: AtomicBool,
    samples: SampleSubject<f64>,
}

impl FixedDevice {
    fn new(available: bool) -> Arc<Self> {
        Arc::new(Self {
            available: AtomicBool::new(available),
            samples: SampleSubject::new(),
        })
    }
}

impl DeviceHandle for FixedDevice {
    fn request_sample(&self) -> thermo_core::Result<()> {
        Ok(())
    }

    fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    fn samples(&self) -> SampleStream {
        self.samples.subscribe()
    }
}

#[test]
fn test_locate_returns_registered_device() {
    let registry = DeviceRegistry::new();
    assert!(registry.is_empty());

    registry.register("10.0.0.5", FixedDevice::new(true));

    assert_eq!(registry.len(), 1);
    assert!(registry.locate("10.0.0.5").is_some());
    assert!(registry.locate("10.0.0.6").is_none());
}

#[test]
fn test_register_replaces_and_remove_forgets() {
    let registry = DeviceRegistry::new();
    assert!(registry.register("h", FixedDevice::new(true)).is_none());
    assert!(registry.register("h", FixedDevice::new(false)).is_some());

    assert!(registry.remove("h").is_some());
    assert!(registry.locate("h").is_none());
    assert!(registry.remove("h").is_none());
}

#[test]
fn test_clones_share_the_table() {
    let registry = DeviceRegistry::new();
    let discovery = registry.clone();

    discovery.register("h", FixedDevice::new(true));

    assert!(registry.locate("h").is_some());
}

#[test]
fn test_presence_classifies_availability() {
    let registry = DeviceRegistry::new();
    assert!(matches!(presence(&registry, "h"), Presence::Absent));

    let device = FixedDevice::new(false);
    registry.register("h", device.clone());
    assert!(matches!(presence(&registry, "h"), Presence::Inactive));

    device.available.store(true, Ordering::SeqCst);
    assert!(matches!(presence(&registry, "h"), Presence::Ready(_)));
}

#[test]
fn test_closure_locator() {
    let device: Arc<dyn DeviceHandle> = FixedDevice::new(true);
    let locator = move |host: &str| (host == "lab").then(|| device.clone());

    assert!(matches!(presence(&locator, "lab"), Presence::Ready(_)));
    assert!(matches!(presence(&locator, "attic"), Presence::Absent));
}
