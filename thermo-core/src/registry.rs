// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{DeviceHandle, DeviceLocator};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// In-memory table of discovered devices, keyed by host address.
///
/// Discovery code registers devices as they show up and removes them when they are
/// lost; sensors only ever see the table through [`DeviceLocator`]. Clones share the
/// same table.
#[derive(Clone, Default)]
pub struct DeviceRegistry {
    devices: Arc<RwLock<HashMap<String, Arc<dyn DeviceHandle>>>>,
}

impl DeviceRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `device` under `host`, returning the device it replaced.
    pub fn register(
        &self,
        host: impl Into<String>,
        device: Arc<dyn DeviceHandle>,
    ) -> Option<Arc<dyn DeviceHandle>> {
        self.devices.write().insert(host.into(), device)
    }

    pub fn remove(&self, host: &str) -> Option<Arc<dyn DeviceHandle>> {
        self.devices.write().remove(host)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.devices.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.devices.read().is_empty()
    }
}

impl DeviceLocator for DeviceRegistry {
    fn locate(&self, host: &str) -> Option<Arc<dyn DeviceHandle>> {
        self.devices.read().get(host).cloned()
    }
}

impl core::fmt::Debug for DeviceRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let devices = self.devices.read();
        f.debug_struct("DeviceRegistry")
            .field("hosts", &devices.keys().collect::<Vec<_>>())
            .finish()
    }
}
