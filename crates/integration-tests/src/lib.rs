//! Integration tests for Bazaar.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p bazaar-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `checkout_flow` - Catalog to delivered order, across every core module
//! - `bank_accounts` - Account lifecycle and PIN recovery
//! - `vehicles` - Factory builds driven through the capability traits
//!
//! This library holds the fixtures those tests share.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use bazaar_core::payment::CreditCard;
use bazaar_core::product::{Book, Clothing, Electronics, ProductError, SharedProduct};
use bazaar_core::user::{User, UserError};
use bazaar_core::{Address, Currency, IdSequence, Money, MoneyError, ProductId};
use chrono::{Datelike, Utc};

/// A small catalog priced in one currency.
#[derive(Debug)]
pub struct Catalog {
    pub book: SharedProduct,
    pub laptop: SharedProduct,
    pub shirt: SharedProduct,
}

impl Catalog {
    /// Book at 29.99 (350 pages), laptop at 1299.99 (5.5 lb), shirt at 19.99.
    ///
    /// # Errors
    ///
    /// Returns `ProductError` if a fixture product is rejected.
    pub fn new(currency: Currency) -> Result<Self, ProductError> {
        let ids: IdSequence<ProductId> = IdSequence::default();
        let price = |cents| Money::from_cents(cents, currency).map_err(ProductError::from);
        Ok(Self {
            book: Arc::new(Book::new(
                ids.next_id(),
                "Object Design Handbook",
                "John Doe",
                "978-1234567890",
                price(2999)?,
                350,
            )),
            laptop: Arc::new(Electronics::new(
                ids.next_id(),
                "Gaming Laptop",
                "TechBrand",
                "GX-3000",
                price(129_999)?,
                5.5,
                24,
            )?),
            shirt: Arc::new(Clothing::new(
                ids.next_id(),
                "Cotton T-Shirt",
                "FashionCo",
                "L",
                "Blue",
                price(1999)?,
                "Cotton",
            )?),
        })
    }
}

/// A registered, active customer.
///
/// # Errors
///
/// Returns `UserError` if registration fails.
pub fn customer() -> Result<User, UserError> {
    User::new("john_smith", "john@example.com", "securepass123")
}

#[must_use]
pub fn home_address() -> Address {
    Address::new("123 Main St", "Anytown", "CA", "12345")
}

/// A card that expires two years from now.
#[must_use]
pub fn valid_card() -> CreditCard {
    CreditCard::new(
        "4532123456789012",
        "John Smith",
        12,
        Utc::now().year() + 2,
        "123",
    )
}

#[must_use]
pub fn expired_card() -> CreditCard {
    CreditCard::new("4532123456789012", "John Smith", 1, 2020, "123")
}

/// Whole currency units.
///
/// # Errors
///
/// Returns `MoneyError::NegativeAmount` for negative `units`.
pub fn units(units: i64, currency: Currency) -> Result<Money, MoneyError> {
    Money::new(units.into(), currency)
}
