//! Event — an immutable record of something that happened.
//!
//! Events are produced when readings arrive, automations fire, and contract
//! invocations are requested. They form the platform's audit trail.

use serde::{Deserialize, Serialize};

use crate::id::{AutomationId, DeviceId, EventId};
use crate::time::Timestamp;

/// Classification of an [`Event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    DeviceRegistered,
    ReadingReceived,
    AutomationTriggered,
    ContractInvoked,
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DeviceRegistered => f.write_str("device_registered"),
            Self::ReadingReceived => f.write_str("reading_received"),
            Self::AutomationTriggered => f.write_str("automation_triggered"),
            Self::ContractInvoked => f.write_str("contract_invoked"),
        }
    }
}

/// An immutable platform event with a JSON payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub event_type: EventType,
    pub device_id: Option<DeviceId>,
    pub automation_id: Option<AutomationId>,
    pub data: serde_json::Value,
    pub timestamp: Timestamp,
}

impl Event {
    /// Create an event stamped with the current time.
    #[must_use]
    pub fn new(event_type: EventType, data: serde_json::Value) -> Self {
        Self {
            id: EventId::new(),
            event_type,
            device_id: None,
            automation_id: None,
            data,
            timestamp: crate::time::now(),
        }
    }

    /// Attach the originating device.
    #[must_use]
    pub fn with_device(mut self, device_id: DeviceId) -> Self {
        self.device_id = Some(device_id);
        self
    }

    /// Attach the automation involved.
    #[must_use]
    pub fn with_automation(mut self, automation_id: AutomationId) -> Self {
        self.automation_id = Some(automation_id);
        self
    }
}
