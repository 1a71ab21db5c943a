//! Types stored in the session for authentication state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockinvent_core::{AuthProvider, Email, PhoneNumber, UserId};

/// The signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Identity provider's user id.
    pub uid: UserId,
    pub email: Option<Email>,
    pub phone_number: Option<PhoneNumber>,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
    pub provider: AuthProvider,
}

impl CurrentUser {
    /// Best available name: display name, then mailbox, then phone.
    #[must_use]
    pub fn name(&self) -> String {
        self.display_name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .or_else(|| self.email.as_ref().map(|e| e.local_part().to_string()))
            .or_else(|| self.phone_number.as_ref().map(PhoneNumber::display))
            .unwrap_or_else(|| "User".to_string())
    }

    /// Secondary line under the name in the sidebar.
    #[must_use]
    pub fn contact(&self) -> String {
        self.email.as_ref().map_or_else(
            || {
                self.phone_number
                    .as_ref()
                    .map(PhoneNumber::display)
                    .unwrap_or_default()
            },
            ToString::to_string,
        )
    }

    /// Upper-cased first letter for the avatar placeholder.
    #[must_use]
    pub fn initial(&self) -> String {
        self.name()
            .chars()
            .next()
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_default()
    }
}

/// A pending phone verification between "send OTP" and "verify OTP".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhoneVerification {
    pub phone_number: PhoneNumber,
    /// Opaque verification handle returned by the identity provider.
    pub session_info: String,
    pub sent_at: DateTime<Utc>,
}

/// Session keys.
pub mod keys {
    /// The signed-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// CSRF state for the Google redirect flow.
    pub const OAUTH_STATE: &str = "oauth_state";

    /// Identity provider session id for the Google redirect flow.
    pub const OAUTH_SESSION_ID: &str = "oauth_session_id";

    /// Pending phone verification.
    pub const PHONE_VERIFICATION: &str = "phone_verification";

    /// Sidebar collapsed preference.
    pub const SIDEBAR_COLLAPSED: &str = "sidebar_collapsed";
}
