//! Business logic services.
//!
//! # Services
//!
//! - `archiver` - Zero-stock archiving policy, restore and permanent delete
//! - `auth` - Firebase Authentication (Google, phone OTP, email/password)
//! - `dashboard` - Stats, charts, insights and notifications
//! - `export` - CSV export of list views

pub mod archiver;
pub mod auth;
pub mod dashboard;
pub mod export;

pub use auth::{AuthError, AuthStep, IdentityProvider};
pub use export::ExportError;
