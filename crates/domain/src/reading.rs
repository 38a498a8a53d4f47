//! Sensor reading — a single observed value from a device.

use serde::{Deserialize, Serialize};

use crate::id::DeviceId;
use crate::time::Timestamp;

/// One observation of one sensor field on one device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub device_id: DeviceId,
    /// Sensor field name, e.g. `"temperature"`.
    pub field: String,
    pub value: f64,
    pub recorded_at: Timestamp,
}

impl SensorReading {
    /// Create a reading stamped with the current time.
    #[must_use]
    pub fn new(device_id: DeviceId, field: impl Into<String>, value: f64) -> Self {
        Self {
            device_id,
            field: field.into(),
            value,
            recorded_at: crate::time::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_stamp_reading_with_current_time() {
        let before = crate::time::now();
        let reading = SensorReading::new(DeviceId::new(), "temperature", 21.5);
        assert!(reading.recorded_at >= before);
        assert_eq!(reading.field, "temperature");
    }

    #[test]
    fn should_roundtrip_reading_through_serde_json() {
        let reading = SensorReading::new(DeviceId::new(), "humidity", 63.0);
        let json = serde_json::to_string(&reading).unwrap();
        let parsed: SensorReading = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, reading);
    }
}
