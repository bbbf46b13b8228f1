//! Core types for Maestro.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod asset;
pub mod email;
pub mod id;
pub mod kind;
pub mod price;

pub use asset::AssetRef;
pub use email::{Email, EmailError};
pub use id::*;
pub use kind::ProductKind;
pub use price::{Price, PriceError};
