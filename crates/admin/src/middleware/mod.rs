//! HTTP middleware for the back office.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request span with status and latency)
//! 3. Session layer (tower-sessions, in-memory store)
//!
//! Authentication is enforced per handler through the [`RequireAuth`]
//! extractor rather than a guard layer, so public routes need no
//! allow-list.

pub mod auth;
pub mod session;

pub use auth::{AuthRejection, OptionalAuth, RequireAuth, clear_current_user, set_current_user};
pub use session::{SESSION_COOKIE_NAME, create_session_layer};
