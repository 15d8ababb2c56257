//! In-memory device storage backing the device routes.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use devreg_core::device::{CreateUpdateDevice, Device, DeviceSummary};
use devreg_core::types::DbId;
use tokio::sync::RwLock;

/// Devices keyed by id. Ids start at 1 and are never reused.
#[derive(Debug)]
pub struct DeviceStore {
    devices: RwLock<BTreeMap<DbId, Device>>,
    next_id: AtomicI64,
}

impl Default for DeviceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceStore {
    pub fn new() -> Self {
        Self {
            devices: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// All devices, ordered by id.
    pub async fn list(&self) -> Vec<DeviceSummary> {
        self.devices
            .read()
            .await
            .values()
            .map(DeviceSummary::from)
            .collect()
    }

    pub async fn get(&self, id: DbId) -> Option<Device> {
        self.devices.read().await.get(&id).cloned()
    }

    pub async fn create(&self, input: CreateUpdateDevice) -> Device {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let now = Utc::now();
        let device = Device {
            id,
            name: input.name,
            device_type_name: input.device_type_name,
            is_enabled: input.is_enabled,
            additional_properties: input.additional_properties,
            created_at: now,
            updated_at: now,
        };
        self.devices.write().await.insert(id, device.clone());
        device
    }

    /// Replace a device's fields. Returns `None` if `id` is unknown.
    pub async fn update(&self, id: DbId, input: CreateUpdateDevice) -> Option<Device> {
        let mut devices = self.devices.write().await;
        let device = devices.get_mut(&id)?;
        device.name = input.name;
        device.device_type_name = input.device_type_name;
        device.is_enabled = input.is_enabled;
        device.additional_properties = input.additional_properties;
        device.updated_at = Utc::now();
        Some(device.clone())
    }

    /// Returns whether a device was removed.
    pub async fn delete(&self, id: DbId) -> bool {
        self.devices.write().await.remove(&id).is_some()
    }
}
