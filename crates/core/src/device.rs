//! Device model and request DTOs.
//!
//! Wire names are camelCase (`deviceTypeName`, `isEnabled`,
//! `additionalProperties`), matching the payloads the validation middleware
//! inspects.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// A stored device.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: DbId,
    pub name: String,
    pub device_type_name: String,
    pub is_enabled: bool,
    pub additional_properties: Map<String, Value>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Row shape for device listings.
#[derive(Debug, Clone, Serialize)]
pub struct DeviceSummary {
    pub id: DbId,
    pub name: String,
}

impl From<&Device> for DeviceSummary {
    fn from(device: &Device) -> Self {
        Self {
            id: device.id,
            name: device.name.clone(),
        }
    }
}

/// Body of `POST /api/devices` and `PUT /api/devices/{id}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUpdateDevice {
    pub name: String,
    pub device_type_name: String,
    #[serde(default)]
    pub is_enabled: bool,
    #[serde(default)]
    pub additional_properties: Map<String, Value>,
}

impl CreateUpdateDevice {
    /// Reject blank names. Per-type property rules are enforced earlier, by
    /// the validation middleware.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::Validation("name must not be blank".into()));
        }
        if self.device_type_name.trim().is_empty() {
            return Err(CoreError::Validation(
                "deviceTypeName must not be blank".into(),
            ));
        }
        Ok(())
    }
}
