//! Field bag — the values a wizard collects across its steps.

use std::collections::BTreeMap;

/// A single collected value: free text or a boolean flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

/// Mapping from field name to collected value.
///
/// All fields are optional until a step rule marks them required.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldBag {
    values: BTreeMap<String, FieldValue>,
}

impl FieldBag {
    /// Create an empty bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a text field, replacing any previous value.
    pub fn set_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), FieldValue::Text(value.into()));
    }

    /// Set a boolean flag, replacing any previous value.
    pub fn set_flag(&mut self, name: impl Into<String>, value: bool) {
        self.values.insert(name.into(), FieldValue::Flag(value));
    }

    /// The text value of a field, if it is set and textual.
    #[must_use]
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(FieldValue::Text(value)) => Some(value.as_str()),
            _ => None,
        }
    }

    /// The flag value of a field; unset flags read as `false`.
    #[must_use]
    pub fn flag(&self, name: &str) -> bool {
        matches!(self.values.get(name), Some(FieldValue::Flag(true)))
    }

    /// Whether a field is missing, non-textual, or only whitespace.
    ///
    /// Flags never count as blank once set.
    #[must_use]
    pub fn is_blank(&self, name: &str) -> bool {
        match self.values.get(name) {
            Some(FieldValue::Text(value)) => value.trim().is_empty(),
            Some(FieldValue::Flag(_)) => false,
            None => true,
        }
    }

    /// Remove every collected value.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Whether nothing has been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_read_back_text_field() {
        let mut bag = FieldBag::new();
        bag.set_text("name", "Frost guard");
        assert_eq!(bag.text("name"), Some("Frost guard"));
    }

    #[test]
    fn should_read_unset_flag_as_false() {
        let bag = FieldBag::new();
        assert!(!bag.flag("use_custom_method"));
    }

    #[test]
    fn should_read_set_flag_back() {
        let mut bag = FieldBag::new();
        bag.set_flag("use_custom_method", true);
        assert!(bag.flag("use_custom_method"));
    }

    #[test]
    fn should_treat_missing_and_whitespace_fields_as_blank() {
        let mut bag = FieldBag::new();
        assert!(bag.is_blank("name"));
        bag.set_text("name", "   ");
        assert!(bag.is_blank("name"));
        bag.set_text("name", "x");
        assert!(!bag.is_blank("name"));
    }

    #[test]
    fn should_not_treat_set_flag_as_blank() {
        let mut bag = FieldBag::new();
        bag.set_flag("enabled", false);
        assert!(!bag.is_blank("enabled"));
    }

    #[test]
    fn should_replace_value_when_set_twice() {
        let mut bag = FieldBag::new();
        bag.set_text("name", "first");
        bag.set_text("name", "second");
        assert_eq!(bag.text("name"), Some("second"));
    }

    #[test]
    fn should_be_empty_after_clear() {
        let mut bag = FieldBag::new();
        bag.set_text("name", "x");
        bag.set_flag("flag", true);
        bag.clear();
        assert!(bag.is_empty());
        assert!(bag.is_blank("name"));
    }
}
