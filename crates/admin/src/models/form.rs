//! Field-level validation messages for HTML forms.

use std::collections::BTreeMap;

/// Validation messages keyed by form field name.
///
/// Templates look messages up with [`FormErrors::get`] and render nothing
/// for fields without one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<&'static str, String>);

impl FormErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for `field`, keeping the first one reported.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    /// Message for `field`, or an empty string.
    #[must_use]
    pub fn get(&self, field: &str) -> &str {
        self.0.get(field).map_or("", String::as_str)
    }

    #[must_use]
    pub fn has(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `Ok(value)` when nothing was recorded.
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one field failed.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

/// Trimmed copy of a required text field, recording `message` when blank.
pub(crate) fn required(
    errors: &mut FormErrors,
    field: &'static str,
    value: &str,
    message: &str,
) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.add(field, message);
    }
    trimmed.to_string()
}

/// `None` for a blank optional text field.
pub(crate) fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_message_wins() {
        let mut errors = FormErrors::new();
        errors.add("price", "Price is required");
        errors.add("price", "Price must be a positive number");
        assert_eq!(errors.get("price"), "Price is required");
        assert_eq!(errors.get("name"), "");
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_into_result() {
        assert_eq!(FormErrors::new().into_result(3), Ok(3));
        let mut errors = FormErrors::new();
        errors.add("name", "Product name is required");
        assert!(errors.into_result(3).is_err());
    }

    #[test]
    fn test_required_and_optional() {
        let mut errors = FormErrors::new();
        assert_eq!(required(&mut errors, "name", "  Desk  ", "missing"), "Desk");
        assert!(errors.is_empty());
        required(&mut errors, "category", "   ", "Category is required");
        assert!(errors.has("category"));
        assert_eq!(optional(Some("  ")), None);
        assert_eq!(optional(Some(" A1 ")), Some("A1".to_string()));
    }
}
