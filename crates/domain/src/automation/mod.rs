//! Automation — sensor conditions → contract method rules.
//!
//! An automation watches one device's sensor readings. When every
//! [`Condition`] holds at once, the platform invokes the configured method
//! on the target smart contract. Automations are the record produced by the
//! creation wizard and consumed by the evaluation engine.

mod condition;

pub use condition::{Comparator, Condition, ParseComparatorError};

use serde::{Deserialize, Serialize};

use crate::error::{ChainSenseError, ValidationError};
use crate::id::{AutomationId, ContractId, DeviceId};
use crate::time::Timestamp;

/// Whether the automation is evaluated against incoming readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutomationStatus {
    Active,
    Paused,
}

impl std::fmt::Display for AutomationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => f.write_str("active"),
            Self::Paused => f.write_str("paused"),
        }
    }
}

/// A rule bridging sensor data to a contract method call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Automation {
    pub id: AutomationId,
    pub name: String,
    pub description: Option<String>,
    /// Device whose readings are evaluated.
    pub device_id: DeviceId,
    /// All conditions must hold at once (logical AND).
    pub conditions: Vec<Condition>,
    /// Contract whose method is invoked when the automation fires.
    pub contract_id: ContractId,
    /// Method name on the target contract.
    pub method: String,
    pub status: AutomationStatus,
    pub created_at: Timestamp,
    pub last_triggered: Option<Timestamp>,
}

impl Automation {
    /// Create a builder for constructing an [`Automation`].
    #[must_use]
    pub fn builder() -> AutomationBuilder {
        AutomationBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ChainSenseError::Validation`] when:
    /// - `name` is empty ([`ValidationError::EmptyName`])
    /// - `conditions` is empty ([`ValidationError::NoConditions`])
    /// - any condition has an empty sensor field
    ///   ([`ValidationError::EmptySensorField`])
    /// - `method` is empty ([`ValidationError::EmptyMethod`])
    pub fn validate(&self) -> Result<(), ChainSenseError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if self.conditions.is_empty() {
            return Err(ValidationError::NoConditions.into());
        }
        if self.conditions.iter().any(|c| c.sensor_field.is_empty()) {
            return Err(ValidationError::EmptySensorField.into());
        }
        if self.method.is_empty() {
            return Err(ValidationError::EmptyMethod.into());
        }
        Ok(())
    }

    /// Whether the automation is evaluated against incoming readings.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == AutomationStatus::Active
    }

    /// Evaluate all conditions against the latest observed value per sensor
    /// field. A field with no observation yet counts as not holding.
    #[must_use]
    pub fn conditions_met<F>(&self, observed: F) -> bool
    where
        F: Fn(&str) -> Option<f64>,
    {
        self.conditions
            .iter()
            .all(|c| observed(&c.sensor_field).is_some_and(|value| c.holds(value)))
    }
}

/// Step-by-step builder for [`Automation`].
#[derive(Debug, Default)]
pub struct AutomationBuilder {
    id: Option<AutomationId>,
    name: Option<String>,
    description: Option<String>,
    device_id: Option<DeviceId>,
    conditions: Vec<Condition>,
    contract_id: Option<ContractId>,
    method: Option<String>,
    status: Option<AutomationStatus>,
    created_at: Option<Timestamp>,
    last_triggered: Option<Timestamp>,
}

impl AutomationBuilder {
    #[must_use]
    pub fn id(mut self, id: AutomationId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn device(mut self, device_id: DeviceId) -> Self {
        self.device_id = Some(device_id);
        self
    }

    #[must_use]
    pub fn condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    #[must_use]
    pub fn contract(mut self, contract_id: ContractId) -> Self {
        self.contract_id = Some(contract_id);
        self
    }

    #[must_use]
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    #[must_use]
    pub fn status(mut self, status: AutomationStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn created_at(mut self, ts: Timestamp) -> Self {
        self.created_at = Some(ts);
        self
    }

    #[must_use]
    pub fn last_triggered(mut self, ts: Timestamp) -> Self {
        self.last_triggered = Some(ts);
        self
    }

    /// Consume the builder, validate, and return an [`Automation`].
    ///
    /// # Errors
    ///
    /// Returns [`ChainSenseError::Validation`] if required fields are
    /// missing or empty.
    pub fn build(self) -> Result<Automation, ChainSenseError> {
        let automation = Automation {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            description: self.description,
            device_id: self.device_id.unwrap_or_default(),
            conditions: self.conditions,
            contract_id: self.contract_id.unwrap_or_default(),
            method: self.method.unwrap_or_default(),
            status: self.status.unwrap_or(AutomationStatus::Active),
            created_at: self.created_at.unwrap_or_else(crate::time::now),
            last_triggered: self.last_triggered,
        };
        automation.validate()?;
        Ok(automation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn frost_guard() -> Automation {
        Automation::builder()
            .name("Frost guard")
            .device(DeviceId::new())
            .condition(Condition::new("temperature", Comparator::LessThan, "4"))
            .contract(ContractId::new())
            .method("closeVents")
            .build()
            .unwrap()
    }

    #[test]
    fn should_build_valid_automation_when_required_fields_provided() {
        let automation = frost_guard();
        assert_eq!(automation.name, "Frost guard");
        assert!(automation.is_active());
        assert_eq!(automation.conditions.len(), 1);
        assert!(automation.last_triggered.is_none());
    }

    #[test]
    fn should_default_to_active_when_status_not_specified() {
        assert_eq!(frost_guard().status, AutomationStatus::Active);
    }

    #[test]
    fn should_build_paused_automation_when_requested() {
        let automation = Automation::builder()
            .name("Paused rule")
            .condition(Condition::new("humidity", Comparator::GreaterThan, "80"))
            .method("ping")
            .status(AutomationStatus::Paused)
            .build()
            .unwrap();
        assert!(!automation.is_active());
    }

    #[test]
    fn should_return_validation_error_when_name_is_empty() {
        let result = Automation::builder()
            .condition(Condition::new("temperature", Comparator::Equal, "0"))
            .method("ping")
            .build();
        assert!(matches!(
            result,
            Err(ChainSenseError::Validation(ValidationError::EmptyName))
        ));
    }

    #[test]
    fn should_return_validation_error_when_conditions_is_empty() {
        let result = Automation::builder().name("No conditions").method("ping").build();
        assert!(matches!(
            result,
            Err(ChainSenseError::Validation(ValidationError::NoConditions))
        ));
    }

    #[test]
    fn should_return_validation_error_when_sensor_field_is_empty() {
        let result = Automation::builder()
            .name("Blank field")
            .condition(Condition::new("", Comparator::Equal, "1"))
            .method("ping")
            .build();
        assert!(matches!(
            result,
            Err(ChainSenseError::Validation(ValidationError::EmptySensorField))
        ));
    }

    #[test]
    fn should_return_validation_error_when_method_is_empty() {
        let result = Automation::builder()
            .name("No method")
            .condition(Condition::new("temperature", Comparator::Equal, "0"))
            .build();
        assert!(matches!(
            result,
            Err(ChainSenseError::Validation(ValidationError::EmptyMethod))
        ));
    }

    #[test]
    fn should_accumulate_multiple_conditions() {
        let automation = Automation::builder()
            .name("Band check")
            .condition(Condition::new("temperature", Comparator::GreaterThan, "18"))
            .condition(Condition::new("temperature", Comparator::LessThan, "26"))
            .method("log")
            .build()
            .unwrap();
        assert_eq!(automation.conditions.len(), 2);
    }

    #[test]
    fn should_meet_conditions_only_when_all_hold() {
        let automation = Automation::builder()
            .name("Hot and dry")
            .condition(Condition::new("temperature", Comparator::GreaterThan, "30"))
            .condition(Condition::new("humidity", Comparator::LessThan, "20"))
            .method("openValve")
            .build()
            .unwrap();

        let mut observed = HashMap::new();
        observed.insert("temperature".to_string(), 35.0);
        observed.insert("humidity".to_string(), 15.0);
        assert!(automation.conditions_met(|field| observed.get(field).copied()));

        observed.insert("humidity".to_string(), 50.0);
        assert!(!automation.conditions_met(|field| observed.get(field).copied()));
    }

    #[test]
    fn should_not_meet_conditions_when_a_field_has_no_observation() {
        let automation = frost_guard();
        assert!(!automation.conditions_met(|_| None));
    }

    #[test]
    fn should_roundtrip_automation_through_serde_json() {
        let automation = frost_guard();
        let json = serde_json::to_string(&automation).unwrap();
        let parsed: Automation = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, automation.id);
        assert_eq!(parsed.name, automation.name);
        assert_eq!(parsed.conditions, automation.conditions);
        assert_eq!(parsed.method, automation.method);
    }
}
