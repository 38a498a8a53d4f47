//! Device — connected hardware that reports sensor readings.
//!
//! A device is the source side of the platform: it owns a set of named
//! sensor fields (e.g. `temperature`, `humidity`) whose readings feed the
//! automation engine.

use serde::{Deserialize, Serialize};

use crate::error::{ChainSenseError, ValidationError};
use crate::id::DeviceId;
use crate::time::Timestamp;

/// Connectivity status of a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceStatus {
    Online,
    Offline,
}

impl std::fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Online => f.write_str("online"),
            Self::Offline => f.write_str("offline"),
        }
    }
}

/// A registered IoT device.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    pub name: String,
    /// Hardware model, free-form (e.g. `"ESP32-S3"`).
    pub model: Option<String>,
    /// Sensor fields this device reports readings for.
    pub sensor_fields: Vec<String>,
    pub status: DeviceStatus,
    pub last_seen: Option<Timestamp>,
}

impl Device {
    /// Create a new offline device with a generated id.
    #[must_use]
    pub fn new(name: impl Into<String>, sensor_fields: Vec<String>) -> Self {
        Self {
            id: DeviceId::new(),
            name: name.into(),
            model: None,
            sensor_fields,
            status: DeviceStatus::Offline,
            last_seen: None,
        }
    }

    /// Set the hardware model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ChainSenseError::Validation`] when:
    /// - `name` is empty ([`ValidationError::EmptyName`])
    /// - `sensor_fields` is empty ([`ValidationError::NoSensorFields`])
    pub fn validate(&self) -> Result<(), ChainSenseError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if self.sensor_fields.is_empty() {
            return Err(ValidationError::NoSensorFields.into());
        }
        Ok(())
    }

    /// Whether the device currently reports the given sensor field.
    #[must_use]
    pub fn reports(&self, field: &str) -> bool {
        self.sensor_fields.iter().any(|f| f == field)
    }

    /// Mark the device online and stamp `last_seen`.
    pub fn seen_at(&mut self, ts: Timestamp) {
        self.status = DeviceStatus::Online;
        self.last_seen = Some(ts);
    }
}
