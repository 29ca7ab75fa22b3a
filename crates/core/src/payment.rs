//! Payment strategies.
//!
//! [`Payable`] is the contract an [`Order`](crate::order::Order) pays
//! through. [`CreditCard`] and [`PayPal`] simulate processing: nothing leaves
//! the process. Both fail closed, so invalid details produce a
//! [`PaymentResult::Declined`] instead of a receipt.

use core::fmt;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ErrorKind;
use crate::types::{CredentialError, Email, Money, PasswordDigest};

/// Errors from payment operations that cannot be expressed as a decline.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PaymentError {
    /// The payment method does not support this operation.
    #[error("{method} does not implement {operation}")]
    NotImplemented {
        /// The payment method that was asked.
        method: PaymentMethod,
        /// The unsupported operation.
        operation: &'static str,
    },

    /// The payment details are invalid.
    #[error("invalid payment information")]
    InvalidPaymentInfo,

    /// Hashing a payment credential failed.
    #[error(transparent)]
    Credential(#[from] CredentialError),
}

impl PaymentError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotImplemented { .. } => ErrorKind::NotImplemented,
            Self::InvalidPaymentInfo | Self::Credential(_) => ErrorKind::Validation,
        }
    }
}

/// Kind of payment method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    CreditCard,
    #[serde(rename = "paypal")]
    PayPal,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreditCard => write!(f, "Credit Card"),
            Self::PayPal => write!(f, "PayPal"),
        }
    }
}

/// Proof of a successful simulated charge or refund.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub transaction_id: String,
    pub amount: Money,
    pub method: PaymentMethod,
    /// Masked card number or account email.
    pub account: String,
    pub processed_at: DateTime<Utc>,
}

/// Outcome of [`Payable::process_payment`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PaymentResult {
    Approved(PaymentReceipt),
    Declined {
        method: PaymentMethod,
        reason: String,
    },
}

impl PaymentResult {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Approved(_))
    }

    /// Transaction id of an approved payment.
    #[must_use]
    pub fn transaction_id(&self) -> Option<&str> {
        match self {
            Self::Approved(receipt) => Some(&receipt.transaction_id),
            Self::Declined { .. } => None,
        }
    }

    #[must_use]
    pub const fn method(&self) -> PaymentMethod {
        match self {
            Self::Approved(receipt) => receipt.method,
            Self::Declined { method, .. } => *method,
        }
    }
}

/// The payment contract.
pub trait Payable: fmt::Debug + Send + Sync {
    /// Which kind of method this is.
    fn method(&self) -> PaymentMethod;

    /// Whether the stored details can be charged.
    fn validate_payment_info(&self) -> bool;

    /// Charge `amount`. Declines without side effects when
    /// [`validate_payment_info`](Self::validate_payment_info) fails.
    fn process_payment(&self, amount: &Money) -> PaymentResult;

    /// Return `amount` of a previous charge.
    ///
    /// # Errors
    ///
    /// The default returns `PaymentError::NotImplemented`; methods that
    /// support refunds override it.
    fn refund(&self, transaction_id: &str, amount: &Money) -> Result<PaymentReceipt, PaymentError> {
        let _ = (transaction_id, amount);
        Err(PaymentError::NotImplemented {
            method: self.method(),
            operation: "refund",
        })
    }
}

// =============================================================================
// Credit card
// =============================================================================

/// A credit card. Only the masked number is retained.
pub struct CreditCard {
    masked_number: String,
    cardholder_name: String,
    expiry_month: u32,
    expiry_year: i32,
    cvv: SecretString,
}

impl CreditCard {
    /// Store card details, masking the number immediately.
    #[must_use]
    pub fn new(
        card_number: &str,
        cardholder_name: impl Into<String>,
        expiry_month: u32,
        expiry_year: i32,
        cvv: &str,
    ) -> Self {
        Self {
            masked_number: mask_card_number(card_number),
            cardholder_name: cardholder_name.into(),
            expiry_month,
            expiry_year,
            cvv: SecretString::from(cvv.to_owned()),
        }
    }

    /// Masked card number, e.g. `**** **** **** 9012`.
    #[must_use]
    pub fn masked_number(&self) -> &str {
        &self.masked_number
    }

    #[must_use]
    pub fn cardholder_name(&self) -> &str {
        &self.cardholder_name
    }

    /// Validate against a given date instead of today.
    #[must_use]
    pub fn validate_at(&self, today: NaiveDate) -> bool {
        if !(1..=12).contains(&self.expiry_month) {
            return false;
        }
        let expired = self.expiry_year < today.year()
            || (self.expiry_year == today.year() && self.expiry_month < today.month());
        if expired {
            return false;
        }
        let cvv = self.cvv.expose_secret();
        (3..=4).contains(&cvv.len()) && cvv.bytes().all(|b| b.is_ascii_digit())
    }
}

impl fmt::Debug for CreditCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreditCard")
            .field("masked_number", &self.masked_number)
            .field("cardholder_name", &self.cardholder_name)
            .field("expiry_month", &self.expiry_month)
            .field("expiry_year", &self.expiry_year)
            .field("cvv", &"[REDACTED]")
            .finish()
    }
}

impl Payable for CreditCard {
    fn method(&self) -> PaymentMethod {
        PaymentMethod::CreditCard
    }

    fn validate_payment_info(&self) -> bool {
        self.validate_at(Utc::now().date_naive())
    }

    fn process_payment(&self, amount: &Money) -> PaymentResult {
        if !self.validate_payment_info() {
            tracing::warn!(card = %self.masked_number, "Credit card declined");
            return PaymentResult::Declined {
                method: self.method(),
                reason: "Invalid payment information".to_owned(),
            };
        }

        let receipt = PaymentReceipt {
            transaction_id: Uuid::new_v4().to_string(),
            amount: *amount,
            method: self.method(),
            account: self.masked_number.clone(),
            processed_at: Utc::now(),
        };
        tracing::info!(
            transaction_id = %receipt.transaction_id,
            amount = %amount,
            "Credit card charged"
        );
        PaymentResult::Approved(receipt)
    }

    fn refund(&self, transaction_id: &str, amount: &Money) -> Result<PaymentReceipt, PaymentError> {
        if !self.validate_payment_info() {
            return Err(PaymentError::InvalidPaymentInfo);
        }
        tracing::info!(%transaction_id, amount = %amount, "Credit card refunded");
        Ok(PaymentReceipt {
            transaction_id: format!("RF_{}", short_uuid()),
            amount: *amount,
            method: self.method(),
            account: self.masked_number.clone(),
            processed_at: Utc::now(),
        })
    }
}

fn mask_card_number(card_number: &str) -> String {
    let digits: Vec<char> = card_number.chars().filter(char::is_ascii_digit).collect();
    let last_four: String = digits
        .iter()
        .skip(digits.len().saturating_sub(4))
        .collect();
    format!("**** **** **** {last_four}")
}

fn short_uuid() -> String {
    Uuid::new_v4().simple().to_string().chars().take(8).collect()
}

// =============================================================================
// PayPal
// =============================================================================

/// A PayPal account. The password is kept only as a digest.
#[derive(Debug)]
pub struct PayPal {
    email: String,
    password: PasswordDigest,
    verified: bool,
}

impl PayPal {
    /// Link a PayPal account. Accounts are assumed verified.
    ///
    /// # Errors
    ///
    /// Returns `PaymentError::Credential` if the password cannot be hashed.
    pub fn new(email: impl Into<String>, password: &str) -> Result<Self, PaymentError> {
        Ok(Self {
            email: email.into(),
            password: PasswordDigest::hash(password)?,
            verified: true,
        })
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn verify_password(&self, password: &str) -> bool {
        self.password.verify(password)
    }

    #[must_use]
    pub const fn is_verified(&self) -> bool {
        self.verified
    }

    pub const fn set_verified(&mut self, verified: bool) {
        self.verified = verified;
    }
}

impl Payable for PayPal {
    fn method(&self) -> PaymentMethod {
        PaymentMethod::PayPal
    }

    fn validate_payment_info(&self) -> bool {
        self.verified && Email::parse(&self.email).is_ok()
    }

    fn process_payment(&self, amount: &Money) -> PaymentResult {
        if !self.validate_payment_info() {
            tracing::warn!(account = %self.email, "PayPal payment declined");
            return PaymentResult::Declined {
                method: self.method(),
                reason: "Invalid PayPal account".to_owned(),
            };
        }

        let receipt = PaymentReceipt {
            transaction_id: format!("PP_{}", short_uuid()),
            amount: *amount,
            method: self.method(),
            account: self.email.clone(),
            processed_at: Utc::now(),
        };
        tracing::info!(
            transaction_id = %receipt.transaction_id,
            amount = %amount,
            "PayPal payment captured"
        );
        PaymentResult::Approved(receipt)
    }
}
