//! Stepper — a bounded, 1-indexed step counter gated by per-step rules.
//!
//! The step only advances when the active step's rule passes against the
//! field bag; it only regresses via an explicit back. Validation failure is
//! reported as data, never as a panic.

use super::fields::FieldBag;

/// An inline, per-field validation message. Recoverable by user correction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Field the message is anchored to.
    pub field: String,
    pub message: String,
}

impl FieldError {
    /// A "this field is required" error for the given field.
    #[must_use]
    pub fn required(field: &str) -> Self {
        Self {
            field: field.to_string(),
            message: format!("{field} is required"),
        }
    }
}

type Check = Box<dyn Fn(&FieldBag) -> Vec<FieldError> + Send + Sync>;

/// Validation rule for one step: required fields plus an optional custom
/// predicate over the field bag.
pub struct StepRule {
    required: Vec<&'static str>,
    check: Option<Check>,
}

impl StepRule {
    /// A step with no requirements (e.g. a review step).
    #[must_use]
    pub fn open() -> Self {
        Self {
            required: Vec::new(),
            check: None,
        }
    }

    /// A step requiring the given fields to be non-blank.
    #[must_use]
    pub fn required(fields: &[&'static str]) -> Self {
        Self {
            required: fields.to_vec(),
            check: None,
        }
    }

    /// Attach a custom predicate evaluated after the required-field checks.
    #[must_use]
    pub fn with_check<F>(mut self, check: F) -> Self
    where
        F: Fn(&FieldBag) -> Vec<FieldError> + Send + Sync + 'static,
    {
        self.check = Some(Box::new(check));
        self
    }

    /// Evaluate the rule; an empty result means the step may be left.
    #[must_use]
    pub fn validate(&self, fields: &FieldBag) -> Vec<FieldError> {
        let mut errors: Vec<FieldError> = self
            .required
            .iter()
            .filter(|name| fields.is_blank(name))
            .map(|name| FieldError::required(name))
            .collect();
        if let Some(check) = &self.check {
            errors.extend(check(fields));
        }
        errors
    }
}

impl std::fmt::Debug for StepRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepRule")
            .field("required", &self.required)
            .field("has_check", &self.check.is_some())
            .finish()
    }
}

/// Result of asking the stepper to advance.
#[derive(Debug, PartialEq, Eq)]
pub enum Advance {
    /// The step moved forward; carries the new step number.
    Moved(usize),
    /// The active step's rule failed; the step is unchanged.
    Blocked(Vec<FieldError>),
    /// Already on the last step; nothing changed.
    AtEnd,
}

/// Bounded step counter, 1-indexed, with one [`StepRule`] per step.
#[derive(Debug)]
pub struct Stepper {
    rules: Vec<StepRule>,
    current: usize,
}

impl Stepper {
    /// Create a stepper positioned on step 1.
    ///
    /// # Panics
    ///
    /// Panics if `rules` is empty — a wizard needs at least one step.
    #[must_use]
    pub fn new(rules: Vec<StepRule>) -> Self {
        assert!(!rules.is_empty(), "a wizard needs at least one step");
        Self { rules, current: 1 }
    }

    /// The active step, always within `[1, total]`.
    #[must_use]
    pub fn current(&self) -> usize {
        self.current
    }

    /// The number of steps.
    #[must_use]
    pub fn total(&self) -> usize {
        self.rules.len()
    }

    /// Whether the active step is the first.
    #[must_use]
    pub fn is_first(&self) -> bool {
        self.current == 1
    }

    /// Whether the active step is the last.
    #[must_use]
    pub fn is_last(&self) -> bool {
        self.current == self.total()
    }

    /// Validate the active step against `fields` and advance when it passes.
    ///
    /// On the last step this is a no-op returning [`Advance::AtEnd`].
    pub fn go_next(&mut self, fields: &FieldBag) -> Advance {
        if self.is_last() {
            return Advance::AtEnd;
        }
        let errors = self.rules[self.current - 1].validate(fields);
        if errors.is_empty() {
            self.current += 1;
            Advance::Moved(self.current)
        } else {
            Advance::Blocked(errors)
        }
    }

    /// Step back without validation, floored at step 1.
    pub fn go_back(&mut self) -> usize {
        if self.current > 1 {
            self.current -= 1;
        }
        self.current
    }

    /// Return to step 1.
    pub fn reset(&mut self) {
        self.current = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_stepper(total: usize) -> Stepper {
        Stepper::new((0..total).map(|_| StepRule::open()).collect())
    }

    #[test]
    fn should_stay_within_bounds_for_any_navigation_sequence() {
        let mut stepper = open_stepper(3);
        let fields = FieldBag::new();
        // A worst-case mix of forward and backward moves.
        for _ in 0..5 {
            stepper.go_back();
            assert!(stepper.current() >= 1 && stepper.current() <= 3);
        }
        for _ in 0..10 {
            let _ = stepper.go_next(&fields);
            assert!(stepper.current() >= 1 && stepper.current() <= 3);
        }
        for _ in 0..10 {
            stepper.go_back();
            assert!(stepper.current() >= 1 && stepper.current() <= 3);
        }
    }

    #[test]
    fn should_not_advance_when_required_field_is_blank() {
        let mut stepper = Stepper::new(vec![StepRule::required(&["name"]), StepRule::open()]);
        let fields = FieldBag::new();

        let outcome = stepper.go_next(&fields);
        assert!(matches!(outcome, Advance::Blocked(ref errors) if errors.len() == 1));
        assert_eq!(stepper.current(), 1);
    }

    #[test]
    fn should_advance_once_required_field_is_set() {
        let mut stepper = Stepper::new(vec![StepRule::required(&["name"]), StepRule::open()]);
        let mut fields = FieldBag::new();
        fields.set_text("name", "Frost guard");

        assert_eq!(stepper.go_next(&fields), Advance::Moved(2));
        assert_eq!(stepper.current(), 2);
    }

    #[test]
    fn should_reach_last_step_after_valid_gates_and_then_stop() {
        let mut stepper = open_stepper(5);
        let fields = FieldBag::new();

        for expected in 2..=5 {
            assert_eq!(stepper.go_next(&fields), Advance::Moved(expected));
        }
        assert_eq!(stepper.current(), 5);

        // A further call has no effect.
        assert_eq!(stepper.go_next(&fields), Advance::AtEnd);
        assert_eq!(stepper.current(), 5);
    }

    #[test]
    fn should_floor_back_navigation_at_step_one() {
        let mut stepper = open_stepper(2);
        assert_eq!(stepper.go_back(), 1);
        assert_eq!(stepper.go_back(), 1);
        assert!(stepper.is_first());
    }

    #[test]
    fn should_not_validate_when_going_back() {
        let mut stepper = Stepper::new(vec![
            StepRule::open(),
            StepRule::required(&["address"]),
            StepRule::open(),
        ]);
        let fields = FieldBag::new();
        let _ = stepper.go_next(&fields);
        assert_eq!(stepper.current(), 2);

        // Step 2's rule is unmet, back still works.
        assert_eq!(stepper.go_back(), 1);
    }

    #[test]
    fn should_run_custom_check_after_required_fields() {
        let rule = StepRule::required(&["port"]).with_check(|fields| {
            match fields.text("port") {
                Some(raw) if raw.parse::<u16>().is_err() => vec![FieldError {
                    field: "port".to_string(),
                    message: "port must be a number".to_string(),
                }],
                _ => Vec::new(),
            }
        });
        let mut stepper = Stepper::new(vec![rule, StepRule::open()]);

        let mut fields = FieldBag::new();
        fields.set_text("port", "not-a-number");
        let outcome = stepper.go_next(&fields);
        assert!(matches!(outcome, Advance::Blocked(ref errors)
            if errors[0].message == "port must be a number"));

        fields.set_text("port", "8080");
        assert_eq!(stepper.go_next(&fields), Advance::Moved(2));
    }

    #[test]
    fn should_return_to_step_one_on_reset() {
        let mut stepper = open_stepper(4);
        let fields = FieldBag::new();
        let _ = stepper.go_next(&fields);
        let _ = stepper.go_next(&fields);
        stepper.reset();
        assert_eq!(stepper.current(), 1);
    }
}
