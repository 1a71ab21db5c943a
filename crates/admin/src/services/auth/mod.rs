//! Sign-in against Firebase Authentication.
//!
//! Three flows are supported: Google (redirect), phone number with an SMS
//! one-time code, and email/password. Without Firebase configuration the
//! [`MockProvider`] stands in so the app runs offline.

mod error;
mod firebase;
mod mock;

pub use error::{AuthError, AuthStep, ProviderCode};
pub use firebase::FirebaseClient;
pub use mock::{MockProvider, TEST_PHONE_NUMBERS};

use secrecy::SecretString;

use stockinvent_core::{Email, OtpCode, PhoneNumber};

use crate::config::AppConfig;
use crate::models::CurrentUser;

/// Where to send the browser to start Google sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoogleRedirect {
    pub auth_uri: String,
    /// Firebase session to hand back when the flow completes.
    pub session_id: Option<String>,
}

/// The configured identity provider.
#[derive(Debug, Clone)]
pub enum IdentityProvider {
    Firebase(FirebaseClient),
    Mock(MockProvider),
}

impl IdentityProvider {
    /// Firebase when configured, the mock otherwise.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Http` if the HTTP client fails to build.
    pub fn from_config(config: &AppConfig) -> Result<Self, AuthError> {
        match &config.firebase {
            Some(firebase) => Ok(Self::Firebase(FirebaseClient::new(firebase)?)),
            None => Ok(Self::Mock(MockProvider)),
        }
    }

    #[must_use]
    pub const fn is_mock(&self) -> bool {
        matches!(self, Self::Mock(_))
    }

    /// Site key for the reCAPTCHA widget on the phone form.
    #[must_use]
    pub fn recaptcha_site_key(&self) -> Option<&str> {
        match self {
            Self::Firebase(client) => Some(client.recaptcha_site_key()),
            Self::Mock(_) => None,
        }
    }

    /// # Errors
    ///
    /// Returns `AuthError` if the provider refuses to start the flow.
    pub async fn start_google(&self, continue_uri: &str) -> Result<GoogleRedirect, AuthError> {
        match self {
            Self::Firebase(client) => client.create_auth_uri(continue_uri).await,
            Self::Mock(_) => Ok(MockProvider::create_auth_uri(continue_uri)),
        }
    }

    /// # Errors
    ///
    /// Returns `AuthError::StateMismatch` if Firebase is in use and
    /// the session lost its flow id.
    pub async fn finish_google(
        &self,
        request_uri: &str,
        session_id: Option<&str>,
    ) -> Result<CurrentUser, AuthError> {
        match self {
            Self::Firebase(client) => {
                let session_id = session_id.ok_or(AuthError::StateMismatch)?;
                client.sign_in_with_idp(request_uri, session_id).await
            }
            Self::Mock(_) => Ok(MockProvider::google_user()),
        }
    }

    /// Send a one-time code; returns the verification session handle.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Provider` if the code cannot be sent.
    pub async fn send_otp(
        &self,
        phone: &PhoneNumber,
        recaptcha_token: Option<&str>,
    ) -> Result<String, AuthError> {
        match self {
            Self::Firebase(client) => client.send_verification_code(phone, recaptcha_token).await,
            Self::Mock(_) => Ok(MockProvider::send_verification_code(phone)),
        }
    }

    /// # Errors
    ///
    /// Returns `AuthError::Provider` if the code is wrong or expired.
    pub async fn verify_otp(
        &self,
        session_info: &str,
        code: &OtpCode,
    ) -> Result<CurrentUser, AuthError> {
        match self {
            Self::Firebase(client) => client.sign_in_with_phone_number(session_info, code).await,
            Self::Mock(_) => MockProvider::sign_in_with_phone_number(session_info, code),
        }
    }

    /// # Errors
    ///
    /// Returns `AuthError::Provider` on bad credentials.
    pub async fn sign_in_with_password(
        &self,
        email: &Email,
        password: &SecretString,
    ) -> Result<CurrentUser, AuthError> {
        match self {
            Self::Firebase(client) => client.sign_in_with_password(email, password).await,
            Self::Mock(_) => MockProvider::sign_in_with_password(email, password),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn mock() -> IdentityProvider {
        IdentityProvider::Mock(MockProvider)
    }

    #[tokio::test]
    async fn test_mock_google_round_trip() {
        let provider = mock();
        let redirect = provider
            .start_google("http://localhost:3001/auth/google/callback")
            .await
            .unwrap();
        assert!(redirect.auth_uri.ends_with("?mock=1"));
        let user = provider
            .finish_google(&redirect.auth_uri, redirect.session_id.as_deref())
            .await
            .unwrap();
        assert_eq!(user.uid.as_str(), "mock-user-123");
    }

    #[tokio::test]
    async fn test_mock_phone_flow() {
        let provider = mock();
        let phone = PhoneNumber::parse("+912233200000").unwrap();
        let session = provider.send_otp(&phone, None).await.unwrap();
        let user = provider
            .verify_otp(&session, &OtpCode::parse("654321").unwrap())
            .await
            .unwrap();
        assert_eq!(user.uid.as_str(), "phone-user-456");
    }

    #[test]
    fn test_local_config_uses_mock() {
        let config = AppConfig::local(std::env::temp_dir());
        let provider = IdentityProvider::from_config(&config).unwrap();
        assert!(provider.is_mock());
        assert_eq!(provider.recaptcha_site_key(), None);
    }
}
