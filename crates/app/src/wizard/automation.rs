//! Automation creation wizard.
//!
//! Four steps: details (name + device), trigger conditions, contract action,
//! review. The finished [`Automation`] is handed to the caller-supplied
//! completion callback; the wizard never persists anything itself.

use std::collections::BTreeMap;

use chainsense_domain::automation::Automation;
use chainsense_domain::contract::SmartContract;
use chainsense_domain::device::Device;
use chainsense_domain::id::{ConditionId, ContractId, DeviceId};

use super::conditions::{ConditionField, ConditionList, RemoveOutcome};
use super::fields::FieldBag;
use super::notice::Notice;
use super::stepper::{Advance, FieldError, StepRule, Stepper};

const FIELD_NAME: &str = "name";
const FIELD_DESCRIPTION: &str = "description";
const FIELD_DEVICE: &str = "device";
const FIELD_CONTRACT: &str = "contract";
const FIELD_METHOD: &str = "method";
const FIELD_CUSTOM_METHOD: &str = "custom_method";
const FLAG_CUSTOM_METHOD: &str = "use_custom_method";

const STEP_DETAILS: usize = 1;
const STEP_CONDITIONS: usize = 2;
const STEP_ACTION: usize = 3;
const STEP_REVIEW: usize = 4;

/// Selectable options supplied by the caller when the wizard opens.
///
/// Fetching these lists is collaborator territory; the wizard only reads
/// them.
#[derive(Debug, Clone, Default)]
pub struct AutomationWizardOptions {
    pub devices: Vec<Device>,
    pub contracts: Vec<SmartContract>,
}

/// Completion callback invoked with the finished record.
type OnComplete = Box<dyn FnMut(Automation) + Send>;

/// Step-gated wizard that assembles an [`Automation`].
///
/// State is created fresh when the wizard opens and reset to defaults on
/// successful submission or explicit cancel; it is never persisted.
pub struct AutomationWizard {
    stepper: Stepper,
    fields: FieldBag,
    conditions: ConditionList,
    selected_device: Option<DeviceId>,
    selected_contract: Option<ContractId>,
    errors: BTreeMap<String, String>,
    notices: Vec<Notice>,
    is_submitting: bool,
    is_open: bool,
    options: AutomationWizardOptions,
    on_complete: Option<OnComplete>,
}

impl AutomationWizard {
    /// Open a fresh wizard over the caller's selectable options.
    #[must_use]
    pub fn open(options: AutomationWizardOptions) -> Self {
        Self {
            stepper: Stepper::new(Self::step_rules()),
            fields: FieldBag::new(),
            conditions: ConditionList::new(),
            selected_device: None,
            selected_contract: None,
            errors: BTreeMap::new(),
            notices: Vec::new(),
            is_submitting: false,
            is_open: true,
            options,
            on_complete: None,
        }
    }

    /// Attach the completion callback receiving the finished record.
    #[must_use]
    pub fn with_on_complete<F>(mut self, on_complete: F) -> Self
    where
        F: FnMut(Automation) + Send + 'static,
    {
        self.on_complete = Some(Box::new(on_complete));
        self
    }

    /// Per-step validation rules, indexed by step number.
    fn step_rules() -> Vec<StepRule> {
        vec![
            // Details: a name and a source device.
            StepRule::required(&[FIELD_NAME, FIELD_DEVICE]),
            // Conditions: gated separately against the condition list.
            StepRule::open(),
            // Action: a target contract plus a method, either picked from
            // the contract or typed in when the custom toggle is on.
            StepRule::required(&[FIELD_CONTRACT]).with_check(|fields| {
                let method_field = if fields.flag(FLAG_CUSTOM_METHOD) {
                    FIELD_CUSTOM_METHOD
                } else {
                    FIELD_METHOD
                };
                if fields.is_blank(method_field) {
                    vec![FieldError::required(method_field)]
                } else {
                    Vec::new()
                }
            }),
            // Review.
            StepRule::open(),
        ]
    }

    // --- step navigation -------------------------------------------------

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

    /// Validate the active step and advance when it passes.
    ///
    /// On failure the step is unchanged and the messages are available via
    /// [`field_error`](Self::field_error). On the last step this is a no-op.
    pub fn go_next(&mut self) -> bool {
        self.errors.clear();
        if self.stepper.current() == STEP_CONDITIONS {
            let issues = self.conditions.issues();
            if !issues.is_empty() {
                self.record_errors(issues);
                return false;
            }
        }
        match self.stepper.go_next(&self.fields) {
            Advance::Moved(_) => true,
            Advance::AtEnd => false,
            Advance::Blocked(errors) => {
                self.record_errors(errors);
                false
            }
        }
    }

    /// Step back without validation, floored at the first step.
    pub fn go_back(&mut self) {
        self.errors.clear();
        self.stepper.go_back();
    }

    /// Restore the freshly-opened state: step 1, empty fields, the single
    /// default condition, cleared flags and errors.
    pub fn reset(&mut self) {
        self.stepper.reset();
        self.fields.clear();
        self.conditions.reset();
        self.selected_device = None;
        self.selected_contract = None;
        self.errors.clear();
        self.is_submitting = false;
    }

    /// Discard all state and close the wizard.
    pub fn cancel(&mut self) {
        self.reset();
        self.is_open = false;
    }

    // --- field collection ------------------------------------------------

    /// Set a free-text field (name, description, method, custom method).
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) {
        self.fields.set_text(name, value);
    }

    /// Pick the device whose readings the automation watches.
    pub fn select_device(&mut self, id: DeviceId) {
        self.selected_device = Some(id);
        self.fields.set_text(FIELD_DEVICE, id.to_string());
    }

    /// Pick the contract whose method the automation invokes.
    pub fn select_contract(&mut self, id: ContractId) {
        self.selected_contract = Some(id);
        self.fields.set_text(FIELD_CONTRACT, id.to_string());
    }

    /// Toggle between picking a method from the contract and typing one in.
    pub fn set_custom_method(&mut self, enabled: bool) {
        self.fields.set_flag(FLAG_CUSTOM_METHOD, enabled);
    }

    /// Whether the custom method input is active.
    #[must_use]
    pub fn uses_custom_method(&self) -> bool {
        self.fields.flag(FLAG_CUSTOM_METHOD)
    }

    /// Whether a submission is in flight.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.is_submitting
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

    /// Devices the caller offered for selection.
    #[must_use]
    pub fn device_options(&self) -> &[Device] {
        &self.options.devices
    }

    /// Contracts the caller offered for selection.
    #[must_use]
    pub fn contract_options(&self) -> &[SmartContract] {
        &self.options.contracts
    }

    /// Methods exposed by the currently selected contract.
    #[must_use]
    pub fn method_options(&self) -> &[String] {
        self.selected_contract
            .and_then(|id| self.options.contracts.iter().find(|c| c.id == id))
            .map_or(&[], |contract| contract.methods.as_slice())
    }

    /// Drain the queued notices for display.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    // --- dynamic condition list ------------------------------------------

    /// The current condition drafts.
    #[must_use]
    pub fn conditions(&self) -> &ConditionList {
        &self.conditions
    }

    /// Append a fresh condition row and return its id. Always succeeds.
    pub fn add_condition(&mut self) -> ConditionId {
        self.conditions.add()
    }

    /// Remove a condition row; removing the last one is a no-op that
    /// surfaces a notice instead.
    pub fn remove_condition(&mut self, id: ConditionId) {
        if self.conditions.remove(id) == RemoveOutcome::KeptLast {
            self.notices
                .push(Notice::warning("at least one condition is required"));
        }
    }

    /// Replace one field on a condition row; no-op for an unknown id.
    pub fn update_condition(&mut self, id: ConditionId, field: ConditionField, value: &str) -> bool {
        self.conditions.update(id, field, value)
    }

    // --- submission -------------------------------------------------------

    /// Submit from the review step.
    ///
    /// Synthesizes the [`Automation`], hands it to the completion callback,
    /// queues a success notice, resets the wizard, and closes it. Called
    /// from any earlier step it is a no-op that surfaces a notice.
    pub fn submit(&mut self) -> Option<Automation> {
        if !self.stepper.is_last() {
            self.notices
                .push(Notice::warning("finish the remaining steps before submitting"));
            return None;
        }
        self.is_submitting = true;
        let Some(automation) = self.assemble() else {
            self.is_submitting = false;
            return None;
        };
        if let Some(on_complete) = self.on_complete.as_mut() {
            on_complete(automation.clone());
        }
        self.notices
            .push(Notice::success(format!("automation \"{}\" created", automation.name)));
        self.reset();
        self.is_open = false;
        Some(automation)
    }

    fn assemble(&mut self) -> Option<Automation> {
        let Some(device_id) = self.selected_device else {
            self.errors
                .insert(FIELD_DEVICE.to_string(), "device is required".to_string());
            return None;
        };
        let Some(contract_id) = self.selected_contract else {
            self.errors
                .insert(FIELD_CONTRACT.to_string(), "contract is required".to_string());
            return None;
        };
        let method_field = if self.uses_custom_method() {
            FIELD_CUSTOM_METHOD
        } else {
            FIELD_METHOD
        };
        let method = self.fields.text(method_field).unwrap_or_default().trim().to_string();

        let mut builder = Automation::builder()
            .name(self.fields.text(FIELD_NAME).unwrap_or_default().trim())
            .device(device_id)
            .contract(contract_id)
            .method(method);
        if let Some(description) = self.fields.text(FIELD_DESCRIPTION) {
            if !description.trim().is_empty() {
                builder = builder.description(description.trim());
            }
        }
        for condition in self.conditions.to_conditions() {
            builder = builder.condition(condition);
        }

        match builder.build() {
            Ok(automation) => Some(automation),
            Err(err) => {
                // The step gates make this unreachable in practice; surface
                // it inline rather than dropping it.
                self.errors.insert("form".to_string(), err.to_string());
                None
            }
        }
    }

    fn record_errors(&mut self, errors: Vec<FieldError>) {
        for error in errors {
            self.errors.insert(error.field, error.message);
        }
    }
}

impl std::fmt::Debug for AutomationWizard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutomationWizard")
            .field("current_step", &self.stepper.current())
            .field("is_open", &self.is_open)
            .field("is_submitting", &self.is_submitting)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use chainsense_domain::automation::{AutomationStatus, Comparator};
    use chainsense_domain::contract::SmartContract;

    use super::super::notice::NoticeLevel;

    fn sample_options() -> AutomationWizardOptions {
        let device = Device::new("Greenhouse thermostat", vec!["temperature".to_string()]);
        let contract = SmartContract::builder()
            .name("Irrigation controller")
            .network("sepolia")
            .address("0x5FbDB2315678afecb367f032d93F642f64180aa3")
            .method("openValve")
            .method("closeValve")
            .build()
            .unwrap();
        AutomationWizardOptions {
            devices: vec![device],
            contracts: vec![contract],
        }
    }

    /// Fill the details step and advance past it.
    fn pass_details(wizard: &mut AutomationWizard) {
        let device_id = wizard.device_options()[0].id;
        wizard.set_field("name", "Frost guard");
        wizard.select_device(device_id);
        assert!(wizard.go_next());
    }

    /// Fill the single condition row and advance past the conditions step.
    fn pass_conditions(wizard: &mut AutomationWizard) {
        let id = wizard.conditions().entries()[0].id;
        wizard.update_condition(id, ConditionField::SensorField, "temperature");
        wizard.update_condition(id, ConditionField::Comparator, "<");
        wizard.update_condition(id, ConditionField::Value, "4");
        assert!(wizard.go_next());
    }

    /// Pick the contract and a method and advance past the action step.
    fn pass_action(wizard: &mut AutomationWizard) {
        let contract_id = wizard.contract_options()[0].id;
        wizard.select_contract(contract_id);
        wizard.set_field("method", "closeValve");
        assert!(wizard.go_next());
    }

    #[test]
    fn should_open_on_step_one_with_single_blank_condition() {
        let wizard = AutomationWizard::open(sample_options());
        assert_eq!(wizard.current_step(), 1);
        assert_eq!(wizard.total_steps(), 4);
        assert_eq!(wizard.conditions().len(), 1);
        assert!(wizard.is_open());
        assert!(!wizard.is_submitting());
    }

    #[test]
    fn should_not_advance_when_details_are_missing() {
        let mut wizard = AutomationWizard::open(sample_options());
        assert!(!wizard.go_next());
        assert_eq!(wizard.current_step(), 1);
        assert_eq!(wizard.field_error("name"), Some("name is required"));
        assert_eq!(wizard.field_error("device"), Some("device is required"));
    }

    #[test]
    fn should_not_advance_past_conditions_while_a_row_is_incomplete() {
        let mut wizard = AutomationWizard::open(sample_options());
        pass_details(&mut wizard);

        assert!(!wizard.go_next());
        assert_eq!(wizard.current_step(), 2);
        assert!(wizard.field_error("conditions").is_some());
    }

    #[test]
    fn should_require_picked_method_when_custom_toggle_is_off() {
        let mut wizard = AutomationWizard::open(sample_options());
        pass_details(&mut wizard);
        pass_conditions(&mut wizard);

        let contract_id = wizard.contract_options()[0].id;
        wizard.select_contract(contract_id);
        assert!(!wizard.go_next());
        assert_eq!(wizard.field_error("method"), Some("method is required"));
    }

    #[test]
    fn should_require_typed_method_when_custom_toggle_is_on() {
        let mut wizard = AutomationWizard::open(sample_options());
        pass_details(&mut wizard);
        pass_conditions(&mut wizard);

        let contract_id = wizard.contract_options()[0].id;
        wizard.select_contract(contract_id);
        wizard.set_custom_method(true);
        assert!(!wizard.go_next());
        assert_eq!(
            wizard.field_error("custom_method"),
            Some("custom_method is required")
        );

        wizard.set_field("custom_method", "emergencyShutdown");
        assert!(wizard.go_next());
        assert_eq!(wizard.current_step(), 4);
    }

    #[test]
    fn should_list_methods_of_selected_contract() {
        let mut wizard = AutomationWizard::open(sample_options());
        assert!(wizard.method_options().is_empty());

        let contract_id = wizard.contract_options()[0].id;
        wizard.select_contract(contract_id);
        assert_eq!(wizard.method_options(), ["openValve", "closeValve"]);
    }

    #[test]
    fn should_surface_notice_when_removing_last_condition() {
        let mut wizard = AutomationWizard::open(sample_options());
        let id = wizard.conditions().entries()[0].id;

        wizard.remove_condition(id);

        assert_eq!(wizard.conditions().len(), 1);
        let notices = wizard.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0], Notice::warning("at least one condition is required"));
    }

    #[test]
    fn should_refuse_submit_before_review_step() {
        let mut wizard = AutomationWizard::open(sample_options());
        assert!(wizard.submit().is_none());
        assert!(wizard.is_open());
        assert!(!wizard.take_notices().is_empty());
    }

    #[test]
    fn should_emit_record_to_callback_and_reset_on_submit() {
        let received: Arc<Mutex<Vec<Automation>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&received);
        let mut wizard = AutomationWizard::open(sample_options())
            .with_on_complete(move |automation| sink.lock().unwrap().push(automation));

        pass_details(&mut wizard);
        pass_conditions(&mut wizard);
        pass_action(&mut wizard);
        assert_eq!(wizard.current_step(), 4);

        let submitted = wizard.submit().expect("submission from review step succeeds");
        assert_eq!(submitted.name, "Frost guard");
        assert_eq!(submitted.method, "closeValve");
        assert_eq!(submitted.status, AutomationStatus::Active);
        assert_eq!(submitted.conditions.len(), 1);
        assert_eq!(submitted.conditions[0].comparator, Comparator::LessThan);

        let delivered = received.lock().unwrap();
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].id, submitted.id);

        // State is back to the freshly-opened default, dialog closed.
        assert_eq!(wizard.current_step(), 1);
        assert!(wizard.fields().is_empty());
        assert_eq!(wizard.conditions().len(), 1);
        assert!(!wizard.conditions().entries()[0].is_complete());
        assert!(!wizard.is_submitting());
        assert!(!wizard.is_open());

        let notices = wizard.take_notices();
        assert!(notices.iter().any(|n| n.level == NoticeLevel::Success));
    }

    #[test]
    fn should_discard_state_on_cancel() {
        let mut wizard = AutomationWizard::open(sample_options());
        pass_details(&mut wizard);
        wizard.cancel();
        assert_eq!(wizard.current_step(), 1);
        assert!(wizard.fields().is_empty());
        assert!(!wizard.is_open());
    }

    #[test]
    fn should_keep_step_in_bounds_while_navigating_back_and_forth() {
        let mut wizard = AutomationWizard::open(sample_options());
        pass_details(&mut wizard);
        pass_conditions(&mut wizard);
        for _ in 0..6 {
            wizard.go_back();
            assert!(wizard.current_step() >= 1);
        }
        assert_eq!(wizard.current_step(), 1);
    }
}
