//! StockInvent Core - Shared domain primitives.
//!
//! This crate provides the types used across all StockInvent components:
//! - `admin` - The back-office web application (inventory, orders, billing)
//! - `cli` - Command-line tools for seeding and maintaining the product store
//!
//! # Architecture
//!
//! The core crate contains only types and parsing rules - no I/O, no HTTP
//! clients, no storage. Anything that validates user input without touching
//! the outside world belongs here.
//!
//! # Modules
//!
//! - [`types`] - Typed ids, money, statuses, emails, phone numbers and OTP codes

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
