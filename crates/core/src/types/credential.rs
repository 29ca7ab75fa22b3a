//! One-way credential storage.
//!
//! Passwords and security answers are kept only as Argon2id digests. The
//! plaintext is never stored and cannot be recovered from a digest.

use core::fmt;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use secrecy::{ExposeSecret, SecretString};

use crate::error::ErrorKind;

/// Errors raised while hashing a credential.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    /// The hasher rejected its input.
    #[error("credential hashing failed")]
    Hash,
    /// A PIN is not exactly four ASCII digits.
    #[error("PIN must be exactly {len} digits", len = Pin::LENGTH)]
    InvalidPin,
}

impl CredentialError {
    /// Every credential error is a validation failure.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }
}

/// An Argon2id digest of a secret.
///
/// `Debug` and `Display` never print the digest itself.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Hash `secret` with a fresh random salt.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::Hash` if Argon2 fails.
    pub fn hash(secret: &str) -> Result<Self, CredentialError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(secret.as_bytes(), &salt)
            .map(|hash| Self(hash.to_string()))
            .map_err(|_| CredentialError::Hash)
    }

    /// Check whether `candidate` hashes to this digest.
    #[must_use]
    pub fn verify(&self, candidate: &str) -> bool {
        PasswordHash::new(&self.0).is_ok_and(|parsed| {
            Argon2::default()
                .verify_password(candidate.as_bytes(), &parsed)
                .is_ok()
        })
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest([REDACTED])")
    }
}

/// A four-digit personal identification number.
///
/// Held as a [`SecretString`] so it is zeroized on drop and redacted in
/// debug output.
#[derive(Clone)]
pub struct Pin(SecretString);

impl Pin {
    /// Required number of digits.
    pub const LENGTH: usize = 4;

    /// Parse a PIN.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::InvalidPin` unless `value` is exactly four
    /// ASCII digits.
    pub fn parse(value: &str) -> Result<Self, CredentialError> {
        if value.len() != Self::LENGTH || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CredentialError::InvalidPin);
        }
        Ok(Self(SecretString::from(value.to_owned())))
    }

    /// Compare against an entered PIN.
    #[must_use]
    pub fn matches(&self, entered: &str) -> bool {
        self.0.expose_secret() == entered
    }
}

impl fmt::Debug for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Pin([REDACTED])")
    }
}
