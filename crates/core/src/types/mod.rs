//! Value types shared across the domain.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod address;
pub mod credential;
pub mod email;
pub mod id;
pub mod money;
pub mod status;

pub use address::Address;
pub use credential::{CredentialError, PasswordDigest, Pin};
pub use email::{Email, EmailError};
pub use id::*;
pub use money::{Currency, Money, MoneyError};
pub use status::*;
