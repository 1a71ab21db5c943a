//! Session middleware configuration.
//!
//! Sessions live in process memory (tower-sessions `MemoryStore`). The
//! cookie is SameSite=Lax so it survives the redirect back from Google.

use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::AppConfig;

pub const SESSION_COOKIE_NAME: &str = "stockinvent_session";

/// 24 hours of inactivity.
const SESSION_EXPIRY_SECONDS: i64 = 24 * 60 * 60;

#[must_use]
pub fn create_session_layer(config: &AppConfig) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.uses_https())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
