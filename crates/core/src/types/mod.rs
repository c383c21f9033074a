//! Core types for CHAMP.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod catalog;
pub mod email;
pub mod id;
pub mod numeric;
pub mod product;
pub mod role;

pub use catalog::{Brand, Color, FilterError, PriceBound, PriceRange, Quality, Size};
pub use email::{Email, EmailError};
pub use id::*;
pub use numeric::{number_to_numeric, numeric_to_number};
pub use product::{Product, ProductConversionError, ProductRecord};
pub use role::{RoleError, UserRole};
