//! International phone numbers as typed into the sign-in form.

use core::fmt;

use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneNumberError {
    #[error("Please enter a phone number")]
    Empty,
    #[error("Invalid phone number format. Please enter a valid phone number with country code.")]
    InvalidLength,
}

/// A phone number in E.164 form (`+` followed by digits).
///
/// Parsing drops everything that is not a digit, so `+91 12345-67890`,
/// `(91) 1234567890` and `911234567890` all become `+911234567890`.
///
/// ```
/// use stockinvent_core::PhoneNumber;
///
/// let phone = PhoneNumber::parse("+91 12345-67890").unwrap();
/// assert_eq!(phone.as_str(), "+911234567890");
/// assert_eq!(phone.display(), "+91123 4567890");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// E.164 allows at most 15 digits.
    pub const MAX_DIGITS: usize = 15;
    pub const MIN_DIGITS: usize = 8;

    /// Parse a number from free-form input.
    ///
    /// # Errors
    ///
    /// Returns [`PhoneNumberError::Empty`] when the input has no digits and
    /// [`PhoneNumberError::InvalidLength`] when the digit count falls
    /// outside E.164 bounds.
    pub fn parse(input: &str) -> Result<Self, PhoneNumberError> {
        let digits = Self::sanitize(input);
        if digits.is_empty() {
            return Err(PhoneNumberError::Empty);
        }
        if !(Self::MIN_DIGITS..=Self::MAX_DIGITS).contains(&digits.len()) {
            return Err(PhoneNumberError::InvalidLength);
        }
        Ok(Self(format!("+{digits}")))
    }

    /// Digits of `input` with every other character removed.
    #[must_use]
    pub fn sanitize(input: &str) -> String {
        input.chars().filter(char::is_ascii_digit).collect()
    }

    /// The E.164 form sent to the identity provider.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human form: a space after the first five digits.
    #[must_use]
    pub fn display(&self) -> String {
        let digits = self.0.trim_start_matches('+');
        match (digits.get(..5), digits.get(5..)) {
            (Some(head), Some(tail)) if !tail.is_empty() => format!("+{head} {tail}"),
            _ => self.0.clone(),
        }
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl core::str::FromStr for PhoneNumber {
    type Err = PhoneNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
