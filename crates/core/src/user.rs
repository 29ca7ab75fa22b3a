//! Customer accounts.

use chrono::{DateTime, Utc};

use crate::error::ErrorKind;
use crate::types::{Address, CredentialError, Email, EmailError, PasswordDigest, UserId};

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Errors that can occur during user operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum UserError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Password too short.
    #[error("password must be at least {MIN_PASSWORD_LENGTH} characters")]
    WeakPassword,

    /// The supplied current password is wrong.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Hashing failed.
    #[error(transparent)]
    Credential(#[from] CredentialError),
}

impl UserError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }
}

/// A registered customer.
///
/// The password is held only as a one-way digest. Email, password,
/// addresses, and the active flag change only through the methods below.
#[derive(Debug, Clone)]
pub struct User {
    id: UserId,
    username: String,
    email: Email,
    password: PasswordDigest,
    addresses: Vec<Address>,
    created_at: DateTime<Utc>,
    active: bool,
}

impl User {
    /// Register a new user.
    ///
    /// # Errors
    ///
    /// Returns `UserError::InvalidEmail` if the email format is invalid and
    /// `UserError::WeakPassword` if the password is too short.
    pub fn new(
        username: impl Into<String>,
        email: &str,
        password: &str,
    ) -> Result<Self, UserError> {
        let email = Email::parse(email)?;
        validate_password(password)?;

        let user = Self {
            id: UserId::generate(),
            username: username.into(),
            email,
            password: PasswordDigest::hash(password)?,
            addresses: Vec::new(),
            created_at: Utc::now(),
            active: true,
        };
        tracing::debug!(user_id = %user.id, username = %user.username, "Registered user");
        Ok(user)
    }

    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.email
    }

    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Saved addresses. The slice is read-only; use
    /// [`add_address`](Self::add_address) and
    /// [`remove_address`](Self::remove_address) to change it.
    #[must_use]
    pub fn addresses(&self) -> &[Address] {
        &self.addresses
    }

    /// Replace the email address.
    ///
    /// # Errors
    ///
    /// Returns `UserError::InvalidEmail` and leaves the current email in
    /// place if `email` is malformed.
    pub fn set_email(&mut self, email: &str) -> Result<(), UserError> {
        self.email = Email::parse(email)?;
        Ok(())
    }

    /// Check a password against the stored digest.
    #[must_use]
    pub fn verify_password(&self, password: &str) -> bool {
        self.password.verify(password)
    }

    /// Change the password after verifying the current one.
    ///
    /// # Errors
    ///
    /// Returns `UserError::InvalidCredentials` if `old_password` is wrong and
    /// `UserError::WeakPassword` if `new_password` is too short. The stored
    /// digest is untouched on error.
    pub fn change_password(
        &mut self,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), UserError> {
        if !self.verify_password(old_password) {
            tracing::warn!(user_id = %self.id, "Password change rejected");
            return Err(UserError::InvalidCredentials);
        }
        validate_password(new_password)?;
        self.password = PasswordDigest::hash(new_password)?;
        tracing::info!(user_id = %self.id, "Password changed");
        Ok(())
    }

    /// Save an address. Duplicates are ignored.
    pub fn add_address(&mut self, address: Address) {
        if !self.addresses.contains(&address) {
            self.addresses.push(address);
        }
    }

    /// Forget an address. Unknown addresses are ignored.
    pub fn remove_address(&mut self, address: &Address) {
        self.addresses.retain(|a| a != address);
    }

    pub const fn deactivate(&mut self) {
        self.active = false;
    }

    pub const fn activate(&mut self) {
        self.active = true;
    }
}

impl std::fmt::Display for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "User: {} ({})", self.username, self.email)
    }
}

fn validate_password(password: &str) -> Result<(), UserError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(UserError::WeakPassword);
    }
    Ok(())
}
