//! One-time passcodes for phone sign-in.

use core::fmt;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpError {
    #[error("Please enter a valid 6-digit OTP")]
    InvalidLength,
}

/// A six digit verification code.
///
/// Non-digit characters are discarded before the length check, mirroring
/// the OTP input which only ever accepts digits.
#[derive(Clone, PartialEq, Eq)]
pub struct OtpCode(String);

impl OtpCode {
    pub const LENGTH: usize = 6;

    /// # Errors
    ///
    /// Returns [`OtpError::InvalidLength`] unless exactly six digits remain.
    pub fn parse(input: &str) -> Result<Self, OtpError> {
        let digits: String = input.chars().filter(char::is_ascii_digit).collect();
        if digits.len() == Self::LENGTH {
            Ok(Self(digits))
        } else {
            Err(OtpError::InvalidLength)
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Codes never appear in logs.
impl fmt::Debug for OtpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OtpCode([REDACTED])")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sanitizes() {
        assert_eq!(OtpCode::parse(" 123 456 ").unwrap().as_str(), "123456");
        assert_eq!(OtpCode::parse("12-34-56").unwrap().as_str(), "123456");
    }

    #[test]
    fn test_parse_requires_six_digits() {
        assert_eq!(OtpCode::parse("12345"), Err(OtpError::InvalidLength));
        assert_eq!(OtpCode::parse("1234567"), Err(OtpError::InvalidLength));
        assert_eq!(OtpCode::parse("abcdef"), Err(OtpError::InvalidLength));
    }

    #[test]
    fn test_debug_redacts() {
        let code = OtpCode::parse("654321").unwrap();
        assert!(!format!("{code:?}").contains("654321"));
    }
}
