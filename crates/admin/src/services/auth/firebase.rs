//! Firebase Identity Toolkit REST client.
//!
//! # API Reference
//!
//! - Base URL: `https://identitytoolkit.googleapis.com/v1`
//! - Authentication: web API key via `?key=<key>`
//! - Errors: `{"error": {"code": 400, "message": "CODE : detail"}}`

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::instrument;

use stockinvent_core::{AuthProvider, Email, OtpCode, PhoneNumber, UserId};

use super::{AuthError, GoogleRedirect, ProviderCode};
use crate::config::FirebaseConfig;
use crate::models::CurrentUser;

const BASE_URL: &str = "https://identitytoolkit.googleapis.com/v1";

const GOOGLE_PROVIDER_ID: &str = "google.com";

/// Identity Toolkit client.
#[derive(Clone)]
pub struct FirebaseClient {
    inner: Arc<FirebaseClientInner>,
}

struct FirebaseClientInner {
    client: reqwest::Client,
    api_key: SecretString,
    project_id: String,
    recaptcha_site_key: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateAuthUriRequest<'a> {
    provider_id: &'a str,
    continue_uri: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateAuthUriResponse {
    auth_uri: Option<String>,
    session_id: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignInWithIdpRequest<'a> {
    request_uri: &'a str,
    session_id: &'a str,
    return_secure_token: bool,
    return_idp_credential: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SendVerificationCodeRequest<'a> {
    phone_number: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    recaptcha_token: Option<&'a str>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SendVerificationCodeResponse {
    session_info: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignInWithPhoneNumberRequest<'a> {
    session_info: &'a str,
    code: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignInWithPasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

/// Account fields shared by every sign-in response.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    local_id: Option<String>,
    email: Option<String>,
    phone_number: Option<String>,
    display_name: Option<String>,
    photo_url: Option<String>,
    /// `signInWithIdp` reports some failures in a 200 body.
    error_message: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl SignInResponse {
    fn into_user(self, provider: AuthProvider) -> Result<CurrentUser, AuthError> {
        if let Some(message) = self.error_message {
            return Err(AuthError::provider(ProviderCode::from_message(&message)));
        }
        let uid = self
            .local_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| AuthError::InvalidResponse("missing localId".to_string()))?;

        Ok(CurrentUser {
            uid: UserId::new(uid),
            email: self.email.as_deref().and_then(|e| Email::parse(e).ok()),
            phone_number: self
                .phone_number
                .as_deref()
                .and_then(|p| PhoneNumber::parse(p).ok()),
            display_name: self.display_name.filter(|n| !n.is_empty()),
            photo_url: self.photo_url.filter(|u| !u.is_empty()),
            provider,
        })
    }
}

impl FirebaseClient {
    /// Create a new Identity Toolkit client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &FirebaseConfig) -> Result<Self, AuthError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(15))
            .build()?;

        Ok(Self {
            inner: Arc::new(FirebaseClientInner {
                client,
                api_key: config.api_key.clone(),
                project_id: config.project_id.clone(),
                recaptcha_site_key: config.recaptcha_site_key.clone(),
            }),
        })
    }

    #[must_use]
    pub fn recaptcha_site_key(&self) -> &str {
        &self.inner.recaptcha_site_key
    }

    /// Begin the Google redirect flow. `continue_uri` is where Google sends
    /// the browser back to.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Provider` if Firebase rejects the request.
    #[instrument(skip(self))]
    pub async fn create_auth_uri(&self, continue_uri: &str) -> Result<GoogleRedirect, AuthError> {
        let response: CreateAuthUriResponse = self
            .post(
                "createAuthUri",
                &CreateAuthUriRequest {
                    provider_id: GOOGLE_PROVIDER_ID,
                    continue_uri,
                },
            )
            .await?;

        let auth_uri = response
            .auth_uri
            .ok_or_else(|| AuthError::InvalidResponse("missing authUri".to_string()))?;
        Ok(GoogleRedirect {
            auth_uri,
            session_id: response.session_id,
        })
    }

    /// Finish the Google redirect flow. `request_uri` is the full callback
    /// URL including Google's query string.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Provider` if the exchange is rejected.
    #[instrument(skip_all)]
    pub async fn sign_in_with_idp(
        &self,
        request_uri: &str,
        session_id: &str,
    ) -> Result<CurrentUser, AuthError> {
        let response: SignInResponse = self
            .post(
                "signInWithIdp",
                &SignInWithIdpRequest {
                    request_uri,
                    session_id,
                    return_secure_token: true,
                    return_idp_credential: true,
                },
            )
            .await?;
        response.into_user(AuthProvider::Google)
    }

    /// Text an OTP to `phone`. Returns the verification session handle.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Provider` if Firebase refuses to send the code.
    #[instrument(skip_all, fields(phone = %phone))]
    pub async fn send_verification_code(
        &self,
        phone: &PhoneNumber,
        recaptcha_token: Option<&str>,
    ) -> Result<String, AuthError> {
        let response: SendVerificationCodeResponse = self
            .post(
                "sendVerificationCode",
                &SendVerificationCodeRequest {
                    phone_number: phone.as_str(),
                    recaptcha_token,
                },
            )
            .await?;
        Ok(response.session_info)
    }

    /// Exchange an OTP for a signed-in account.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Provider` with `InvalidVerificationCode` or
    /// `CodeExpired` when the code is rejected.
    #[instrument(skip_all)]
    pub async fn sign_in_with_phone_number(
        &self,
        session_info: &str,
        code: &OtpCode,
    ) -> Result<CurrentUser, AuthError> {
        let response: SignInResponse = self
            .post(
                "signInWithPhoneNumber",
                &SignInWithPhoneNumberRequest {
                    session_info,
                    code: code.as_str(),
                },
            )
            .await?;
        response.into_user(AuthProvider::Phone)
    }

    /// Email/password sign-in.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Provider` with `InvalidCredentials` on a bad
    /// email or password.
    #[instrument(skip_all, fields(email = %email))]
    pub async fn sign_in_with_password(
        &self,
        email: &Email,
        password: &SecretString,
    ) -> Result<CurrentUser, AuthError> {
        let response: SignInResponse = self
            .post(
                "signInWithPassword",
                &SignInWithPasswordRequest {
                    email: email.as_str(),
                    password: password.expose_secret(),
                    return_secure_token: true,
                },
            )
            .await?;
        response.into_user(AuthProvider::Password)
    }

    fn endpoint(method: &str) -> String {
        format!("{BASE_URL}/accounts:{method}")
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        method: &str,
        body: &B,
    ) -> Result<T, AuthError> {
        let response = self
            .inner
            .client
            .post(format!(
                "{}?key={}",
                Self::endpoint(method),
                self.inner.api_key.expose_secret()
            ))
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return response
                .json()
                .await
                .map_err(|e| AuthError::InvalidResponse(format!("failed to parse response: {e}")));
        }

        let text = response.text().await.unwrap_or_default();
        tracing::warn!(method, status = status.as_u16(), "Identity Toolkit request rejected");
        Err(parse_error(&text))
    }
}

/// Turn an Identity Toolkit error body into an `AuthError`.
fn parse_error(body: &str) -> AuthError {
    serde_json::from_str::<ErrorEnvelope>(body).map_or_else(
        |_| AuthError::InvalidResponse(body.chars().take(200).collect()),
        |envelope| AuthError::provider(ProviderCode::from_message(&envelope.error.message)),
    )
}

impl std::fmt::Debug for FirebaseClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirebaseClient")
            .field("project_id", &self.inner.project_id)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint() {
        assert_eq!(
            FirebaseClient::endpoint("signInWithPassword"),
            "https://identitytoolkit.googleapis.com/v1/accounts:signInWithPassword"
        );
    }

    #[test]
    fn test_parse_error_envelope() {
        let body = r#"{"error":{"code":400,"message":"INVALID_CODE","errors":[]}}"#;
        assert!(matches!(
            parse_error(body),
            AuthError::Provider {
                code: ProviderCode::InvalidVerificationCode
            }
        ));

        assert!(matches!(
            parse_error("<html>bad gateway</html>"),
            AuthError::InvalidResponse(_)
        ));
    }

    #[test]
    fn test_sign_in_response_into_user() {
        let json = r#"{
            "localId": "abc123",
            "email": "ops@example.com",
            "displayName": "",
            "photoUrl": "https://example.com/me.png",
            "idToken": "ignored"
        }"#;
        let response: SignInResponse = serde_json::from_str(json).unwrap();
        let user = response.into_user(AuthProvider::Google).unwrap();
        assert_eq!(user.uid.as_str(), "abc123");
        assert_eq!(user.email.unwrap().as_str(), "ops@example.com");
        assert_eq!(user.display_name, None);
        assert_eq!(user.provider, AuthProvider::Google);
    }

    #[test]
    fn test_idp_error_in_success_body() {
        let response = SignInResponse {
            error_message: Some("FEDERATED_USER_ID_ALREADY_LINKED".to_string()),
            ..SignInResponse::default()
        };
        assert!(matches!(
            response.into_user(AuthProvider::Google),
            Err(AuthError::Provider { .. })
        ));
        assert!(matches!(
            SignInResponse::default().into_user(AuthProvider::Phone),
            Err(AuthError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_phone_sign_in_response() {
        let json = r#"{"localId":"p1","phoneNumber":"+911234567890","isNewUser":false}"#;
        let response: SignInResponse = serde_json::from_str(json).unwrap();
        let user = response.into_user(AuthProvider::Phone).unwrap();
        assert_eq!(user.phone_number.unwrap().as_str(), "+911234567890");
    }
}
