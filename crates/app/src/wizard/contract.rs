//! Smart contract registration wizard.
//!
//! Three steps: details (name + network), deployment (address + methods),
//! review. Shares the step machinery with the automation wizard but has no
//! dynamic entry list; the method names are collected as one delimited
//! field.

use std::collections::BTreeMap;

use chainsense_domain::contract::SmartContract;

use super::fields::FieldBag;
use super::notice::Notice;
use super::stepper::{Advance, FieldError, StepRule, Stepper};

const FIELD_NAME: &str = "name";
const FIELD_NETWORK: &str = "network";
const FIELD_ADDRESS: &str = "address";
const FIELD_METHODS: &str = "methods";

/// Completion callback invoked with the finished descriptor.
type OnComplete = Box<dyn FnMut(SmartContract) + Send>;

/// Step-gated wizard that assembles a [`SmartContract`] descriptor.
pub struct ContractWizard {
    stepper: Stepper,
    fields: FieldBag,
    errors: BTreeMap<String, String>,
    notices: Vec<Notice>,
    is_submitting: bool,
    is_open: bool,
    on_complete: Option<OnComplete>,
}

impl ContractWizard {
    /// Open a fresh wizard.
    #[must_use]
    pub fn open() -> Self {
        Self {
            stepper: Stepper::new(Self::step_rules()),
            fields: FieldBag::new(),
            errors: BTreeMap::new(),
            notices: Vec::new(),
            is_submitting: false,
            is_open: true,
            on_complete: None,
        }
    }

    /// Attach the completion callback receiving the finished descriptor.
    #[must_use]
    pub fn with_on_complete<F>(mut self, on_complete: F) -> Self
    where
        F: FnMut(SmartContract) + Send + 'static,
    {
        self.on_complete = Some(Box::new(on_complete));
        self
    }

    fn step_rules() -> Vec<StepRule> {
        vec![
            StepRule::required(&[FIELD_NAME, FIELD_NETWORK]),
            StepRule::required(&[FIELD_ADDRESS, FIELD_METHODS]).with_check(|fields| {
                match fields.text(FIELD_ADDRESS) {
                    Some(address) if !address.trim().is_empty() && !address.trim().starts_with("0x") => {
                        vec![FieldError {
                            field: FIELD_ADDRESS.to_string(),
                            message: "address must be hex-encoded (0x…)".to_string(),
                        }]
                    }
                    _ => Vec::new(),
                }
            }),
            StepRule::open(),
        ]
    }

    /// The active step, 1-indexed.
    #[must_use]
    pub fn current_step(&self) -> usize {
        self.stepper.current()
    }

    #[must_use]
    pub fn total_steps(&self) -> usize {
        self.stepper.total()
    }

    /// Whether the hosting dialog should still be shown.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Whether a submission is in flight.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    /// Set a free-text field.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) {
        self.fields.set_text(name, value);
    }

    /// The collected field values.
    #[must_use]
    pub fn fields(&self) -> &FieldBag {
        &self.fields
    }

    /// The inline message for a field, if its last gate failed.
    #[must_use]
    pub fn field_error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    /// Drain the queued notices for display.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Validate the active step and advance when it passes.
    pub fn go_next(&mut self) -> bool {
        self.errors.clear();
        match self.stepper.go_next(&self.fields) {
            Advance::Moved(_) => true,
            Advance::AtEnd => false,
            Advance::Blocked(errors) => {
                for error in errors {
                    self.errors.insert(error.field, error.message);
                }
                false
            }
        }
    }

    /// Step back without validation, floored at the first step.
    pub fn go_back(&mut self) {
        self.errors.clear();
        self.stepper.go_back();
    }

    /// Restore the freshly-opened state.
    pub fn reset(&mut self) {
        self.stepper.reset();
        self.fields.clear();
        self.errors.clear();
        self.is_submitting = false;
    }

    /// Discard all state and close the wizard.
    pub fn cancel(&mut self) {
        self.reset();
        self.is_open = false;
    }

    /// Submit from the review step; a no-op with a notice anywhere else.
    pub fn submit(&mut self) -> Option<SmartContract> {
        if !self.stepper.is_last() {
            self.notices
                .push(Notice::warning("finish the remaining steps before submitting"));
            return None;
        }
        self.is_submitting = true;
        let Some(contract) = self.assemble() else {
            self.is_submitting = false;
            return None;
        };
        if let Some(on_complete) = self.on_complete.as_mut() {
            on_complete(contract.clone());
        }
        self.notices
            .push(Notice::success(format!("contract \"{}\" registered", contract.name)));
        self.reset();
        self.is_open = false;
        Some(contract)
    }

    fn assemble(&mut self) -> Option<SmartContract> {
        let mut builder = SmartContract::builder()
            .name(self.fields.text(FIELD_NAME).unwrap_or_default().trim())
            .network(self.fields.text(FIELD_NETWORK).unwrap_or_default().trim())
            .address(self.fields.text(FIELD_ADDRESS).unwrap_or_default().trim());
        for method in Self::split_methods(self.fields.text(FIELD_METHODS).unwrap_or_default()) {
            builder = builder.method(method);
        }
        match builder.build() {
            Ok(contract) => Some(contract),
            Err(err) => {
                self.errors.insert("form".to_string(), err.to_string());
                None
            }
        }
    }

    /// Split the delimited methods field into trimmed, non-empty names.
    fn split_methods(raw: &str) -> Vec<String> {
        raw.split([',', '\n'])
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(ToString::to_string)
            .collect()
    }
}

impl std::fmt::Debug for ContractWizard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContractWizard")
            .field("current_step", &self.stepper.current())
            .field("is_open", &self.is_open)
            .field("is_submitting", &self.is_submitting)
            .finish_non_exhaustive()
    }
}
