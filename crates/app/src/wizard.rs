//! Creation wizards — step-gated construction of platform records.
//!
//! A wizard walks the user through an ordered sequence of steps, collecting
//! and validating fields per step, and produces a finished record on
//! completion. The record is handed by value to a caller-supplied callback;
//! persistence belongs to the caller, not the wizard.
//!
//! The machinery is split into small pieces:
//! - [`Stepper`] — a bounded 1-indexed step counter gated by per-step rules
//! - [`FieldBag`] — the collected field values (text and flags)
//! - [`ConditionList`] — the dynamic list of trigger condition drafts
//! - [`Notice`] — non-blocking notices surfaced to the user
//!
//! [`AutomationWizard`] and [`ContractWizard`] compose these into the two
//! record flows the platform offers.
//!
//! All validation failure is recoverable: unmet required fields surface as
//! inline per-field messages and never abort the flow.

mod automation;
mod conditions;
mod contract;
mod fields;
mod notice;
mod stepper;

pub use automation::{AutomationWizard, AutomationWizardOptions};
pub use conditions::{ConditionDraft, ConditionField, ConditionList, RemoveOutcome};
pub use contract::ContractWizard;
pub use fields::{FieldBag, FieldValue};
pub use notice::{Notice, NoticeLevel};
pub use stepper::{Advance, FieldError, StepRule, Stepper};
