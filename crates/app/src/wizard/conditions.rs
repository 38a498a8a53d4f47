//! Condition list — the dynamic, user-editable list of trigger condition
//! drafts inside the automation wizard.
//!
//! Invariant: the list never drops below one entry after initialization.

use chainsense_domain::automation::{Comparator, Condition};
use chainsense_domain::id::ConditionId;

use super::stepper::FieldError;

/// One editable trigger condition row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionDraft {
    pub id: ConditionId,
    pub sensor_field: String,
    pub comparator: Comparator,
    pub value: String,
}

impl ConditionDraft {
    /// A fresh, empty row with a generated id.
    #[must_use]
    pub fn blank() -> Self {
        Self {
            id: ConditionId::new(),
            sensor_field: String::new(),
            comparator: Comparator::GreaterThan,
            value: String::new(),
        }
    }

    /// Whether the row has both a sensor field and a value.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.sensor_field.trim().is_empty() && !self.value.trim().is_empty()
    }

    /// Convert into a domain [`Condition`], keeping the draft's id.
    #[must_use]
    pub fn to_condition(&self) -> Condition {
        Condition {
            id: self.id,
            sensor_field: self.sensor_field.trim().to_string(),
            comparator: self.comparator,
            value: self.value.trim().to_string(),
        }
    }
}

/// The editable fields of a [`ConditionDraft`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionField {
    SensorField,
    Comparator,
    Value,
}

/// Outcome of a removal request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The entry was removed.
    Removed,
    /// The entry is the last one; nothing changed.
    KeptLast,
    /// No entry with that id; nothing changed.
    NotFound,
}

/// Ordered list of condition drafts with a minimum length of one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionList {
    entries: Vec<ConditionDraft>,
}

impl Default for ConditionList {
    fn default() -> Self {
        Self {
            entries: vec![ConditionDraft::blank()],
        }
    }
}

impl ConditionList {
    /// Create a list holding its single default entry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The entries, in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[ConditionDraft] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: the list never drops below one entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append a fresh blank entry and return its id. Always succeeds.
    pub fn add(&mut self) -> ConditionId {
        let draft = ConditionDraft::blank();
        let id = draft.id;
        self.entries.push(draft);
        id
    }

    /// Remove the entry with `id`, unless it is the last remaining one.
    pub fn remove(&mut self, id: ConditionId) -> RemoveOutcome {
        let Some(index) = self.entries.iter().position(|e| e.id == id) else {
            return RemoveOutcome::NotFound;
        };
        if self.entries.len() == 1 {
            return RemoveOutcome::KeptLast;
        }
        self.entries.remove(index);
        RemoveOutcome::Removed
    }

    /// Replace one field on the entry with `id`.
    ///
    /// Returns `false` without changing anything when the id is unknown or
    /// the comparator token does not parse.
    pub fn update(&mut self, id: ConditionId, field: ConditionField, value: &str) -> bool {
        let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) else {
            return false;
        };
        match field {
            ConditionField::SensorField => entry.sensor_field = value.to_string(),
            ConditionField::Comparator => match value.parse::<Comparator>() {
                Ok(comparator) => entry.comparator = comparator,
                Err(_) => return false,
            },
            ConditionField::Value => entry.value = value.to_string(),
        }
        true
    }

    /// Per-row validation issues, anchored to the `conditions` field.
    #[must_use]
    pub fn issues(&self) -> Vec<FieldError> {
        if self.entries.iter().all(ConditionDraft::is_complete) {
            Vec::new()
        } else {
            vec![FieldError {
                field: "conditions".to_string(),
                message: "every condition needs a sensor field and a value".to_string(),
            }]
        }
    }

    /// Convert every draft into a domain [`Condition`].
    #[must_use]
    pub fn to_conditions(&self) -> Vec<Condition> {
        self.entries.iter().map(ConditionDraft::to_condition).collect()
    }

    /// Restore the single default entry.
    pub fn reset(&mut self) {
        self.entries = vec![ConditionDraft::blank()];
    }
}
