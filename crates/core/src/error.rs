//! Crate-wide error type.
//!
//! Each module returns its own error enum. [`Error`] unifies them for callers
//! that drive several modules, and every error reports an [`ErrorKind`] so
//! callers can tell bad input from an illegal state change.

use core::fmt;

use thiserror::Error;

use crate::bank::BankError;
use crate::cart::CartError;
use crate::counter::CounterError;
use crate::order::OrderError;
use crate::payment::PaymentError;
use crate::person::PersonError;
use crate::product::ProductError;
use crate::shape::ShapeError;
use crate::types::{CredentialError, EmailError, MoneyError};
use crate::university::UniversityError;
use crate::user::UserError;
use crate::vehicle::VehicleError;

/// Broad category of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Input was rejected (bad amount, malformed email, unknown size, ...).
    Validation,
    /// The operation is not allowed in the current state.
    State,
    /// The implementation does not support the operation.
    NotImplemented,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation => write!(f, "validation error"),
            Self::State => write!(f, "state error"),
            Self::NotImplemented => write!(f, "not implemented"),
        }
    }
}

/// Any error raised by this crate.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Money(#[from] MoneyError),

    #[error(transparent)]
    Email(#[from] EmailError),

    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    Product(#[from] ProductError),

    #[error(transparent)]
    User(#[from] UserError),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Payment(#[from] PaymentError),

    #[error(transparent)]
    Order(#[from] OrderError),

    #[error(transparent)]
    Bank(#[from] BankError),

    #[error(transparent)]
    Vehicle(#[from] VehicleError),

    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error(transparent)]
    Person(#[from] PersonError),

    #[error(transparent)]
    Counter(#[from] CounterError),

    #[error(transparent)]
    University(#[from] UniversityError),
}

impl Error {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Money(e) => e.kind(),
            Self::Email(e) => e.kind(),
            Self::Credential(e) => e.kind(),
            Self::Product(e) => e.kind(),
            Self::User(e) => e.kind(),
            Self::Cart(e) => e.kind(),
            Self::Payment(e) => e.kind(),
            Self::Order(e) => e.kind(),
            Self::Bank(e) => e.kind(),
            Self::Vehicle(e) => e.kind(),
            Self::Shape(e) => e.kind(),
            Self::Person(e) => e.kind(),
            Self::Counter(e) => e.kind(),
            Self::University(e) => e.kind(),
        }
    }
}

/// Result alias using the crate error.
pub type Result<T, E = Error> = core::result::Result<T, E>;
