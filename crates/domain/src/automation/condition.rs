//! Condition — a guard on a sensor field that must hold for an automation
//! to fire.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::id::ConditionId;
use crate::reading::SensorReading;

/// Comparison operator applied between an observed value and a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparator {
    #[serde(rename = ">")]
    GreaterThan,
    #[serde(rename = "<")]
    LessThan,
    #[serde(rename = "=")]
    Equal,
    #[serde(rename = "!=")]
    NotEqual,
    #[serde(rename = ">=")]
    GreaterOrEqual,
    #[serde(rename = "<=")]
    LessOrEqual,
}

impl Comparator {
    /// All comparators, in display order.
    pub const ALL: [Self; 6] = [
        Self::GreaterThan,
        Self::LessThan,
        Self::Equal,
        Self::NotEqual,
        Self::GreaterOrEqual,
        Self::LessOrEqual,
    ];

    /// Apply the comparison to an observed value and a threshold.
    #[must_use]
    pub fn compare(self, observed: f64, threshold: f64) -> bool {
        match self {
            Self::GreaterThan => observed > threshold,
            Self::LessThan => observed < threshold,
            Self::Equal => (observed - threshold).abs() < f64::EPSILON,
            Self::NotEqual => (observed - threshold).abs() >= f64::EPSILON,
            Self::GreaterOrEqual => observed >= threshold,
            Self::LessOrEqual => observed <= threshold,
        }
    }

    /// The operator's symbol, as shown to users and stored on the wire.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::GreaterThan => ">",
            Self::LessThan => "<",
            Self::Equal => "=",
            Self::NotEqual => "!=",
            Self::GreaterOrEqual => ">=",
            Self::LessOrEqual => "<=",
        }
    }
}

impl std::fmt::Display for Comparator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Error returned when parsing an unknown comparator symbol.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown comparator: {0}")]
pub struct ParseComparatorError(String);

impl FromStr for Comparator {
    type Err = ParseComparatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            ">" => Ok(Self::GreaterThan),
            "<" => Ok(Self::LessThan),
            "=" | "==" => Ok(Self::Equal),
            "!=" => Ok(Self::NotEqual),
            ">=" => Ok(Self::GreaterOrEqual),
            "<=" => Ok(Self::LessOrEqual),
            other => Err(ParseComparatorError(other.to_string())),
        }
    }
}

/// A single trigger condition: `sensor_field comparator value`.
///
/// All conditions on an automation must hold at once (logical AND).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub id: ConditionId,
    /// Sensor field the condition watches, e.g. `"temperature"`.
    pub sensor_field: String,
    pub comparator: Comparator,
    /// Threshold, kept as entered. Numeric comparison when it parses as
    /// `f64`; otherwise only `!=` can hold against a numeric reading.
    pub value: String,
}

impl Condition {
    /// Create a condition with a generated id.
    #[must_use]
    pub fn new(sensor_field: impl Into<String>, comparator: Comparator, value: impl Into<String>) -> Self {
        Self {
            id: ConditionId::new(),
            sensor_field: sensor_field.into(),
            comparator,
            value: value.into(),
        }
    }

    /// The threshold as a number, if it parses.
    #[must_use]
    pub fn threshold(&self) -> Option<f64> {
        self.value.trim().parse().ok()
    }

    /// Evaluate the condition against an observed value for its field.
    #[must_use]
    pub fn holds(&self, observed: f64) -> bool {
        match self.threshold() {
            Some(threshold) => self.comparator.compare(observed, threshold),
            // A numeric reading can never equal a non-numeric threshold.
            None => self.comparator == Comparator::NotEqual,
        }
    }

    /// Evaluate against a reading: the field must match and the value must
    /// satisfy the comparison.
    #[must_use]
    pub fn is_met(&self, reading: &SensorReading) -> bool {
        reading.field == self.sensor_field && self.holds(reading.value)
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.sensor_field, self.comparator, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::DeviceId;

    #[test]
    fn should_compare_with_each_operator() {
        assert!(Comparator::GreaterThan.compare(30.0, 25.0));
        assert!(Comparator::LessThan.compare(20.0, 25.0));
        assert!(Comparator::Equal.compare(25.0, 25.0));
        assert!(Comparator::NotEqual.compare(24.0, 25.0));
        assert!(Comparator::GreaterOrEqual.compare(25.0, 25.0));
        assert!(Comparator::LessOrEqual.compare(25.0, 25.0));
        assert!(!Comparator::GreaterThan.compare(25.0, 25.0));
    }

    #[test]
    fn should_roundtrip_comparator_through_symbol_and_from_str() {
        for comparator in Comparator::ALL {
            let parsed: Comparator = comparator.symbol().parse().unwrap();
            assert_eq!(parsed, comparator);
        }
    }

    #[test]
    fn should_accept_double_equals_as_equality() {
        let parsed: Comparator = "==".parse().unwrap();
        assert_eq!(parsed, Comparator::Equal);
    }

    #[test]
    fn should_return_error_when_parsing_unknown_symbol() {
        let result = Comparator::from_str("~=");
        assert!(result.is_err());
    }

    #[test]
    fn should_serialize_comparator_as_its_symbol() {
        let json = serde_json::to_string(&Comparator::GreaterOrEqual).unwrap();
        assert_eq!(json, "\">=\"");
        let parsed: Comparator = serde_json::from_str("\"!=\"").unwrap();
        assert_eq!(parsed, Comparator::NotEqual);
    }

    #[test]
    fn should_hold_when_numeric_threshold_satisfied() {
        let condition = Condition::new("temperature", Comparator::GreaterThan, "25");
        assert!(condition.holds(30.0));
        assert!(!condition.holds(20.0));
    }

    #[test]
    fn should_only_hold_not_equal_when_threshold_is_not_numeric() {
        let equal = Condition::new("mode", Comparator::Equal, "eco");
        let not_equal = Condition::new("mode", Comparator::NotEqual, "eco");
        assert!(!equal.holds(1.0));
        assert!(not_equal.holds(1.0));
    }

    #[test]
    fn should_not_meet_condition_when_field_differs() {
        let condition = Condition::new("temperature", Comparator::GreaterThan, "25");
        let reading = SensorReading::new(DeviceId::new(), "humidity", 90.0);
        assert!(!condition.is_met(&reading));
    }

    #[test]
    fn should_meet_condition_when_field_matches_and_value_satisfies() {
        let condition = Condition::new("temperature", Comparator::GreaterOrEqual, "25");
        let reading = SensorReading::new(DeviceId::new(), "temperature", 25.0);
        assert!(condition.is_met(&reading));
    }

    #[test]
    fn should_display_condition_as_field_operator_value() {
        let condition = Condition::new("temperature", Comparator::LessOrEqual, "18.5");
        assert_eq!(condition.to_string(), "temperature <= 18.5");
    }

    #[test]
    fn should_roundtrip_condition_through_serde_json() {
        let condition = Condition::new("humidity", Comparator::LessThan, "40");
        let json = serde_json::to_string(&condition).unwrap();
        let parsed: Condition = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, condition);
    }
}
