//! CHAMP Core - Shared types library.
//!
//! This crate provides common types used across all CHAMP components:
//! - `storefront` - JSON API for the shop and its admin panel
//! - `cli` - Command-line tools for migrations, users, and seeding
//!
//! # Architecture
//!
//! The core crate contains only types and pure conversions - no I/O, no
//! database access, no HTTP. Database encoding is available behind the
//! `postgres` feature.
//!
//! # Modules
//!
//! - [`types`] - IDs, emails, roles, catalog filters, prices, and products

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
