//! Authentication error types and their user-facing messages.

use thiserror::Error;

use stockinvent_core::{EmailError, OtpError, PhoneNumberError};

/// Step of a sign-in flow, used to pick the message shown on the login page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStep {
    Google,
    SendOtp,
    VerifyOtp,
    Password,
}

/// Error code reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderCode {
    InvalidPhoneNumber,
    TooManyRequests,
    QuotaExceeded,
    OperationNotAllowed,
    InvalidVerificationCode,
    CodeExpired,
    MissingSession,
    InvalidCredentials,
    UserDisabled,
    CaptchaFailed,
    Other(String),
}

impl ProviderCode {
    /// Map an Identity Toolkit error message such as
    /// `TOO_MANY_ATTEMPTS_TRY_LATER : Access to this account...` to a code.
    #[must_use]
    pub fn from_message(message: &str) -> Self {
        let code = message.split(" : ").next().unwrap_or_default().trim();
        match code {
            "INVALID_PHONE_NUMBER" | "MISSING_PHONE_NUMBER" => Self::InvalidPhoneNumber,
            "TOO_MANY_ATTEMPTS_TRY_LATER" => Self::TooManyRequests,
            "QUOTA_EXCEEDED" => Self::QuotaExceeded,
            "OPERATION_NOT_ALLOWED" | "ADMIN_ONLY_OPERATION" => Self::OperationNotAllowed,
            "INVALID_CODE" | "MISSING_CODE" => Self::InvalidVerificationCode,
            "SESSION_EXPIRED" | "CODE_EXPIRED" => Self::CodeExpired,
            "INVALID_SESSION_INFO" | "MISSING_SESSION_INFO" => Self::MissingSession,
            "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS"
            | "INVALID_EMAIL" => Self::InvalidCredentials,
            "USER_DISABLED" => Self::UserDisabled,
            "CAPTCHA_CHECK_FAILED" | "MISSING_RECAPTCHA_TOKEN" | "INVALID_RECAPTCHA_TOKEN" => {
                Self::CaptchaFailed
            }
            other => Self::Other(other.to_string()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::InvalidPhoneNumber => "auth/invalid-phone-number",
            Self::TooManyRequests => "auth/too-many-requests",
            Self::QuotaExceeded => "auth/quota-exceeded",
            Self::OperationNotAllowed => "auth/operation-not-allowed",
            Self::InvalidVerificationCode => "auth/invalid-verification-code",
            Self::CodeExpired => "auth/code-expired",
            Self::MissingSession => "auth/missing-verification-id",
            Self::InvalidCredentials => "auth/invalid-credential",
            Self::UserDisabled => "auth/user-disabled",
            Self::CaptchaFailed => "auth/captcha-check-failed",
            Self::Other(code) => code,
        }
    }
}

impl std::fmt::Display for ProviderCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors from the sign-in flows.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The identity provider rejected the request.
    #[error("identity provider error: {code}")]
    Provider { code: ProviderCode },

    /// HTTP request to the identity provider failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The identity provider answered with something unexpected.
    #[error("invalid provider response: {0}")]
    InvalidResponse(String),

    /// Verify was called without a pending phone verification.
    #[error("no pending phone verification")]
    MissingConfirmation,

    /// Google callback state did not match the session.
    #[error("sign-in state mismatch")]
    StateMismatch,

    #[error(transparent)]
    InvalidEmail(#[from] EmailError),

    #[error(transparent)]
    InvalidPhone(#[from] PhoneNumberError),

    #[error(transparent)]
    InvalidOtp(#[from] OtpError),

    /// Email sign-in without a password.
    #[error("Please enter your password")]
    MissingPassword,
}

impl AuthError {
    pub(crate) const fn provider(code: ProviderCode) -> Self {
        Self::Provider { code }
    }

    /// Message rendered on the login page after `step` failed.
    #[must_use]
    pub fn user_message(&self, step: AuthStep) -> String {
        match self {
            Self::InvalidEmail(e) => return e.to_string(),
            Self::InvalidPhone(e) => return e.to_string(),
            Self::InvalidOtp(e) => return e.to_string(),
            Self::MissingPassword => return self.to_string(),
            Self::MissingConfirmation => {
                return "No confirmation result found. Please request OTP again.".to_string();
            }
            Self::Provider { code } => {
                if let Some(message) = code_message(code, step) {
                    return message.to_string();
                }
            }
            Self::Http(_) | Self::InvalidResponse(_) | Self::StateMismatch => {}
        }

        match (step, self) {
            (AuthStep::Google, Self::Provider { code }) => {
                format!("Failed to sign in with Google: {code}")
            }
            (AuthStep::Google, _) => "Failed to sign in with Google. Please try again.".to_string(),
            (AuthStep::SendOtp, _) => "Failed to send OTP. Please try again.".to_string(),
            (AuthStep::VerifyOtp, _) => "Failed to verify OTP. Please try again.".to_string(),
            (AuthStep::Password, _) => "Failed to sign in. Please try again.".to_string(),
        }
    }

    /// Whether this is the caller's fault rather than the provider's.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        !matches!(self, Self::Http(_) | Self::InvalidResponse(_))
    }
}

fn code_message(code: &ProviderCode, step: AuthStep) -> Option<&'static str> {
    let message = match (code, step) {
        (ProviderCode::InvalidPhoneNumber, _) => {
            "Invalid phone number format. Please enter a valid phone number with country code."
        }
        (ProviderCode::TooManyRequests, _) => "Too many attempts. Please try again later.",
        (ProviderCode::QuotaExceeded, _) => "Daily quota exceeded. Please try again tomorrow.",
        (ProviderCode::OperationNotAllowed, AuthStep::Password) => {
            "Email sign-in is not enabled. Please contact support."
        }
        (ProviderCode::OperationNotAllowed, _) => {
            "Phone authentication is not enabled. Please contact support."
        }
        (ProviderCode::InvalidVerificationCode, _) => "Invalid OTP. Please check and try again.",
        (ProviderCode::CodeExpired, _) => "OTP has expired. Please request a new one.",
        (ProviderCode::MissingSession, _) => {
            "No confirmation result found. Please request OTP again."
        }
        (ProviderCode::InvalidCredentials, _) => "Invalid email or password.",
        (ProviderCode::UserDisabled, _) => "This account has been disabled.",
        (ProviderCode::CaptchaFailed, _) => "reCAPTCHA verification failed. Please try again.",
        (ProviderCode::Other(_), _) => return None,
    };
    Some(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(message: &str) -> AuthError {
        AuthError::provider(ProviderCode::from_message(message))
    }

    #[test]
    fn test_code_parsing_strips_detail() {
        assert_eq!(
            ProviderCode::from_message("TOO_MANY_ATTEMPTS_TRY_LATER : Access disabled"),
            ProviderCode::TooManyRequests
        );
        assert_eq!(
            ProviderCode::from_message("INVALID_CODE"),
            ProviderCode::InvalidVerificationCode
        );
        assert_eq!(
            ProviderCode::from_message("WEIRD_THING"),
            ProviderCode::Other("WEIRD_THING".to_string())
        );
    }

    #[test]
    fn test_send_otp_messages() {
        assert_eq!(
            provider("INVALID_PHONE_NUMBER : TOO_SHORT").user_message(AuthStep::SendOtp),
            "Invalid phone number format. Please enter a valid phone number with country code."
        );
        assert_eq!(
            provider("QUOTA_EXCEEDED").user_message(AuthStep::SendOtp),
            "Daily quota exceeded. Please try again tomorrow."
        );
        assert_eq!(
            provider("OPERATION_NOT_ALLOWED").user_message(AuthStep::SendOtp),
            "Phone authentication is not enabled. Please contact support."
        );
        assert_eq!(
            provider("SOMETHING_ELSE").user_message(AuthStep::SendOtp),
            "Failed to send OTP. Please try again."
        );
    }

    #[test]
    fn test_verify_otp_messages() {
        assert_eq!(
            provider("INVALID_CODE").user_message(AuthStep::VerifyOtp),
            "Invalid OTP. Please check and try again."
        );
        assert_eq!(
            provider("SESSION_EXPIRED").user_message(AuthStep::VerifyOtp),
            "OTP has expired. Please request a new one."
        );
        assert_eq!(
            provider("TOO_MANY_ATTEMPTS_TRY_LATER").user_message(AuthStep::VerifyOtp),
            "Too many attempts. Please try again later."
        );
        assert_eq!(
            AuthError::MissingConfirmation.user_message(AuthStep::VerifyOtp),
            "No confirmation result found. Please request OTP again."
        );
        assert_eq!(
            AuthError::InvalidResponse("empty".to_string()).user_message(AuthStep::VerifyOtp),
            "Failed to verify OTP. Please try again."
        );
    }

    #[test]
    fn test_google_message_carries_code() {
        assert_eq!(
            provider("FEDERATED_USER_ID_ALREADY_LINKED").user_message(AuthStep::Google),
            "Failed to sign in with Google: FEDERATED_USER_ID_ALREADY_LINKED"
        );
    }

    #[test]
    fn test_validation_errors_pass_through() {
        let err = AuthError::from(OtpError::InvalidLength);
        assert_eq!(
            err.user_message(AuthStep::VerifyOtp),
            "Please enter a valid 6-digit OTP"
        );
        assert!(err.is_user_error());
        assert_eq!(
            AuthError::MissingPassword.user_message(AuthStep::Password),
            "Please enter your password"
        );
    }
}
