//! Offline identity provider used when Firebase is not configured.

use secrecy::{ExposeSecret, SecretString};

use stockinvent_core::{AuthProvider, Email, OtpCode, PhoneNumber, UserId};

use super::{AuthError, GoogleRedirect, ProviderCode};
use crate::models::CurrentUser;

/// Phone numbers that can sign in, with their fixed OTP and user id.
pub const TEST_PHONE_NUMBERS: [(&str, &str, &str); 2] = [
    ("+911234567890", "123456", "phone-user-123"),
    ("+912233200000", "654321", "phone-user-456"),
];

const SESSION_PREFIX: &str = "mock-session:";

/// Accepts the test phone numbers, any email with a password, and signs
/// every Google attempt in as the same test user.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockProvider;

impl MockProvider {
    /// Google redirect that lands straight back on the callback.
    #[must_use]
    pub fn create_auth_uri(continue_uri: &str) -> GoogleRedirect {
        let separator = if continue_uri.contains('?') { '&' } else { '?' };
        GoogleRedirect {
            auth_uri: format!("{continue_uri}{separator}mock=1"),
            session_id: None,
        }
    }

    #[must_use]
    pub fn google_user() -> CurrentUser {
        CurrentUser {
            uid: UserId::new("mock-user-123"),
            email: Email::parse("test@example.com").ok(),
            phone_number: None,
            display_name: Some("Test User".to_string()),
            photo_url: Some("https://via.placeholder.com/150".to_string()),
            provider: AuthProvider::Mock,
        }
    }

    /// Any well-formed number gets a session; only test numbers can verify.
    #[must_use]
    pub fn send_verification_code(phone: &PhoneNumber) -> String {
        format!("{SESSION_PREFIX}{phone}")
    }

    /// # Errors
    ///
    /// Returns `InvalidVerificationCode` unless the number and code are one
    /// of the test pairs, `MissingSession` for a foreign session handle.
    pub fn sign_in_with_phone_number(
        session_info: &str,
        code: &OtpCode,
    ) -> Result<CurrentUser, AuthError> {
        let phone = session_info
            .strip_prefix(SESSION_PREFIX)
            .ok_or(AuthError::provider(ProviderCode::MissingSession))?;

        let (number, _, uid) = TEST_PHONE_NUMBERS
            .iter()
            .find(|(number, otp, _)| *number == phone && *otp == code.as_str())
            .ok_or(AuthError::provider(ProviderCode::InvalidVerificationCode))?;

        Ok(CurrentUser {
            uid: UserId::new(*uid),
            email: None,
            phone_number: PhoneNumber::parse(number).ok(),
            display_name: Some("Phone User".to_string()),
            photo_url: None,
            provider: AuthProvider::Mock,
        })
    }

    /// # Errors
    ///
    /// Returns `MissingPassword` for a blank password.
    pub fn sign_in_with_password(
        email: &Email,
        password: &SecretString,
    ) -> Result<CurrentUser, AuthError> {
        if password.expose_secret().is_empty() {
            return Err(AuthError::MissingPassword);
        }
        Ok(CurrentUser {
            uid: UserId::new(format!("email-user-{}", email.local_part())),
            email: Some(email.clone()),
            phone_number: None,
            display_name: None,
            photo_url: None,
            provider: AuthProvider::Mock,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn otp(code: &str) -> OtpCode {
        OtpCode::parse(code).unwrap()
    }

    #[test]
    fn test_google_user() {
        let user = MockProvider::google_user();
        assert_eq!(user.uid.as_str(), "mock-user-123");
        assert_eq!(user.name(), "Test User");
        assert_eq!(user.email.unwrap().as_str(), "test@example.com");
    }

    #[test]
    fn test_redirect_returns_to_callback() {
        let redirect = MockProvider::create_auth_uri("http://localhost:3001/auth/google/callback?csrf=x");
        assert_eq!(
            redirect.auth_uri,
            "http://localhost:3001/auth/google/callback?csrf=x&mock=1"
        );
        assert!(redirect.session_id.is_none());
    }

    #[test]
    fn test_test_numbers_sign_in() {
        let phone = PhoneNumber::parse("+91 1234567890").unwrap();
        let session = MockProvider::send_verification_code(&phone);
        let user = MockProvider::sign_in_with_phone_number(&session, &otp("123456")).unwrap();
        assert_eq!(user.uid.as_str(), "phone-user-123");
        assert_eq!(user.display_name.as_deref(), Some("Phone User"));

        let phone = PhoneNumber::parse("+912233200000").unwrap();
        let session = MockProvider::send_verification_code(&phone);
        let user = MockProvider::sign_in_with_phone_number(&session, &otp("654321")).unwrap();
        assert_eq!(user.uid.as_str(), "phone-user-456");
    }

    #[test]
    fn test_wrong_code_is_rejected() {
        let phone = PhoneNumber::parse("+911234567890").unwrap();
        let session = MockProvider::send_verification_code(&phone);
        let err = MockProvider::sign_in_with_phone_number(&session, &otp("654321")).unwrap_err();
        assert!(matches!(
            err,
            AuthError::Provider {
                code: ProviderCode::InvalidVerificationCode
            }
        ));
    }

    #[test]
    fn test_foreign_session_is_rejected() {
        let err = MockProvider::sign_in_with_phone_number("real-session", &otp("123456")).unwrap_err();
        assert!(matches!(
            err,
            AuthError::Provider {
                code: ProviderCode::MissingSession
            }
        ));
    }

    #[test]
    fn test_password_sign_in() {
        let email = Email::parse("clerk@example.com").unwrap();
        let user =
            MockProvider::sign_in_with_password(&email, &SecretString::from("hunter2")).unwrap();
        assert_eq!(user.uid.as_str(), "email-user-clerk");
        assert_eq!(user.name(), "clerk");

        assert!(matches!(
            MockProvider::sign_in_with_password(&email, &SecretString::from("")),
            Err(AuthError::MissingPassword)
        ));
    }
}
