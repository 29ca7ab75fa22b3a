//! Currency-tagged monetary amounts using decimal arithmetic.
//!
//! [`Money`] is immutable: every operation returns a new value. Amounts are
//! never negative and are rounded to two decimal places on construction.

use core::cmp::Ordering;
use core::fmt;
use core::ops::{Add, Div, Mul, Sub};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ErrorKind;

/// Errors that can occur when constructing or combining [`Money`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MoneyError {
    /// The amount is below zero.
    #[error("amount cannot be negative (got {0})")]
    NegativeAmount(Decimal),
    /// Two amounts with different currencies were combined.
    #[error("cannot combine {left} and {right}")]
    CurrencyMismatch {
        /// Currency of the left operand.
        left: Currency,
        /// Currency of the right operand.
        right: Currency,
    },
    /// A subtraction would go below zero.
    #[error("result would be negative")]
    NegativeResult,
    /// A scalar operand is negative.
    #[error("cannot scale money by a negative number ({0})")]
    NegativeScalar(Decimal),
    /// Division by zero.
    #[error("cannot divide money by zero")]
    DivisionByZero,
    /// The result does not fit in a decimal.
    #[error("arithmetic overflow")]
    Overflow,
    /// Unknown currency code.
    #[error("unsupported currency: {0}")]
    UnknownCurrency(String),
}

impl MoneyError {
    /// Every money error is a validation failure.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    USD,
    EUR,
    GBP,
    JPY,
    CAD,
    AUD,
}

impl Currency {
    /// Display symbol (e.g. `$`).
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
            Self::JPY => "¥",
        }
    }

    /// Three-letter currency code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::JPY => "JPY",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Currency {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Self::USD),
            "EUR" => Ok(Self::EUR),
            "GBP" => Ok(Self::GBP),
            "JPY" => Ok(Self::JPY),
            "CAD" => Ok(Self::CAD),
            "AUD" => Ok(Self::AUD),
            _ => Err(MoneyError::UnknownCurrency(s.to_owned())),
        }
    }
}

/// A non-negative amount of a single currency.
///
/// Equality and hashing consider both amount and currency. Ordering is only
/// defined between amounts of the same currency: [`PartialOrd`] returns
/// `None` across currencies and [`Money::try_cmp`] reports the mismatch.
///
/// ```
/// use bazaar_core::{Currency, Money};
/// use rust_decimal::Decimal;
///
/// let a = Money::usd(Decimal::new(2599, 2)).unwrap();
/// let b = Money::usd(Decimal::new(1550, 2)).unwrap();
///
/// assert_eq!(a.checked_add(&b).unwrap().to_string(), "$41.49 USD");
/// assert_eq!(a.checked_sub(&b).unwrap().amount(), Decimal::new(1049, 2));
/// assert!(b.checked_sub(&a).is_err());
/// assert!(a > b);
///
/// let euros = Money::new(Decimal::ONE, Currency::EUR).unwrap();
/// assert!(a.checked_add(&euros).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "MoneyRepr")]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

#[derive(Deserialize)]
struct MoneyRepr {
    amount: Decimal,
    currency: Currency,
}

impl TryFrom<MoneyRepr> for Money {
    type Error = MoneyError;

    fn try_from(repr: MoneyRepr) -> Result<Self, Self::Error> {
        Self::new(repr.amount, repr.currency)
    }
}

impl Money {
    /// Number of decimal places kept.
    pub const SCALE: u32 = 2;

    /// Create an amount, rounded to two decimal places.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::NegativeAmount` if `amount` is below zero.
    pub fn new(amount: Decimal, currency: Currency) -> Result<Self, MoneyError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(MoneyError::NegativeAmount(amount));
        }
        Ok(Self::from_parts(amount, currency))
    }

    /// Create a US dollar amount.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::NegativeAmount` if `amount` is below zero.
    pub fn usd(amount: Decimal) -> Result<Self, MoneyError> {
        Self::new(amount, Currency::USD)
    }

    /// Create an amount from minor units (e.g. cents).
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::NegativeAmount` if `cents` is below zero.
    pub fn from_cents(cents: i64, currency: Currency) -> Result<Self, MoneyError> {
        Self::new(Decimal::new(cents, Self::SCALE), currency)
    }

    /// Zero in the given currency.
    #[must_use]
    pub const fn zero(currency: Currency) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency,
        }
    }

    /// Build from an amount already known to be non-negative.
    pub(crate) fn from_parts(amount: Decimal, currency: Currency) -> Self {
        let mut amount = amount.round_dp(Self::SCALE);
        // Normalise -0.00 so it compares and hashes like zero.
        if amount.is_zero() {
            amount = Decimal::ZERO;
        }
        Self { amount, currency }
    }

    /// The decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    /// The currency.
    #[must_use]
    pub const fn currency(&self) -> Currency {
        self.currency
    }

    /// True if the amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    fn same_currency(&self, other: &Self) -> Result<(), MoneyError> {
        if self.currency == other.currency {
            Ok(())
        } else {
            Err(MoneyError::CurrencyMismatch {
                left: self.currency,
                right: other.currency,
            })
        }
    }

    /// Add two amounts of the same currency.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::CurrencyMismatch` if currencies differ.
    pub fn checked_add(&self, other: &Self) -> Result<Self, MoneyError> {
        self.same_currency(other)?;
        let sum = self
            .amount
            .checked_add(other.amount)
            .ok_or(MoneyError::Overflow)?;
        Ok(Self::from_parts(sum, self.currency))
    }

    /// Subtract `other` from `self`.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::CurrencyMismatch` if currencies differ and
    /// `MoneyError::NegativeResult` if `other` is larger than `self`.
    pub fn checked_sub(&self, other: &Self) -> Result<Self, MoneyError> {
        self.same_currency(other)?;
        if other.amount > self.amount {
            return Err(MoneyError::NegativeResult);
        }
        Ok(Self::from_parts(self.amount - other.amount, self.currency))
    }

    /// Multiply by a non-negative scalar.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::NegativeScalar` for a negative factor and
    /// `MoneyError::Overflow` if the product does not fit.
    pub fn checked_mul(&self, factor: Decimal) -> Result<Self, MoneyError> {
        if factor.is_sign_negative() && !factor.is_zero() {
            return Err(MoneyError::NegativeScalar(factor));
        }
        let product = self
            .amount
            .checked_mul(factor)
            .ok_or(MoneyError::Overflow)?;
        Ok(Self::from_parts(product, self.currency))
    }

    /// Multiply by a quantity.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::Overflow` if the product does not fit.
    pub fn times(&self, quantity: u32) -> Result<Self, MoneyError> {
        self.checked_mul(Decimal::from(quantity))
    }

    /// Divide by a positive scalar.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::DivisionByZero` for zero and
    /// `MoneyError::NegativeScalar` for a negative divisor.
    pub fn checked_div(&self, divisor: Decimal) -> Result<Self, MoneyError> {
        if divisor.is_zero() {
            return Err(MoneyError::DivisionByZero);
        }
        if divisor.is_sign_negative() {
            return Err(MoneyError::NegativeScalar(divisor));
        }
        let quotient = self
            .amount
            .checked_div(divisor)
            .ok_or(MoneyError::Overflow)?;
        Ok(Self::from_parts(quotient, self.currency))
    }

    /// Compare two amounts of the same currency.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::CurrencyMismatch` if currencies differ.
    pub fn try_cmp(&self, other: &Self) -> Result<Ordering, MoneyError> {
        self.same_currency(other)?;
        Ok(self.amount.cmp(&other.amount))
    }

    /// Sum a sequence of amounts, starting from zero in `currency`.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::CurrencyMismatch` if any item is in a different
    /// currency.
    pub fn sum<'a, I>(items: I, currency: Currency) -> Result<Self, MoneyError>
    where
        I: IntoIterator<Item = &'a Self>,
    {
        items
            .into_iter()
            .try_fold(Self::zero(currency), |acc, item| acc.checked_add(item))
    }
}

impl PartialOrd for Money {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.try_cmp(other).ok()
    }
}

// Operators mirror the checked methods; each yields a `Result`, so
// `(a + b)?` reads like arithmetic but still reports mismatches.

impl Add for Money {
    type Output = Result<Self, MoneyError>;

    fn add(self, other: Self) -> Self::Output {
        self.checked_add(&other)
    }
}

impl Sub for Money {
    type Output = Result<Self, MoneyError>;

    fn sub(self, other: Self) -> Self::Output {
        self.checked_sub(&other)
    }
}

impl Mul<Decimal> for Money {
    type Output = Result<Self, MoneyError>;

    fn mul(self, factor: Decimal) -> Self::Output {
        self.checked_mul(factor)
    }
}

impl Mul<Money> for Decimal {
    type Output = Result<Money, MoneyError>;

    fn mul(self, money: Money) -> Self::Output {
        money.checked_mul(self)
    }
}

impl Mul<u32> for Money {
    type Output = Result<Self, MoneyError>;

    fn mul(self, quantity: u32) -> Self::Output {
        self.times(quantity)
    }
}

impl Div<Decimal> for Money {
    type Output = Result<Self, MoneyError>;

    fn div(self, divisor: Decimal) -> Self::Output {
        self.checked_div(divisor)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{:.2} {}",
            self.currency.symbol(),
            self.amount,
            self.currency.code()
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn usd(cents: i64) -> Money {
        Money::from_cents(cents, Currency::USD).unwrap()
    }

    #[test]
    fn test_new_rejects_negative() {
        assert!(matches!(
            Money::usd(Decimal::NEGATIVE_ONE),
            Err(MoneyError::NegativeAmount(_))
        ));
    }

    #[test]
    fn test_zero_is_allowed() {
        let zero = Money::usd(Decimal::ZERO).unwrap();
        assert!(zero.is_zero());
        assert_eq!(zero, Money::zero(Currency::USD));
    }

    #[test]
    fn test_rounds_to_cents() {
        let m = Money::usd(Decimal::new(50_983, 4)).unwrap();
        assert_eq!(m.amount(), Decimal::new(510, 2));
    }

    #[test]
    fn test_add_and_sub() {
        let a = usd(2599);
        let b = usd(1550);
        assert_eq!(a.checked_add(&b).unwrap(), usd(4149));
        assert_eq!(a.checked_sub(&b).unwrap(), usd(1049));
    }

    #[test]
    fn test_sub_past_zero_fails() {
        assert_eq!(
            usd(100).checked_sub(&usd(101)),
            Err(MoneyError::NegativeResult)
        );
    }

    #[test]
    fn test_currency_mismatch() {
        let euros = Money::from_cents(100, Currency::EUR).unwrap();
        assert!(matches!(
            usd(100).checked_add(&euros),
            Err(MoneyError::CurrencyMismatch {
                left: Currency::USD,
                right: Currency::EUR
            })
        ));
        assert!(usd(100).checked_sub(&euros).is_err());
        assert!(usd(100).try_cmp(&euros).is_err());
        assert_eq!(usd(100).partial_cmp(&euros), None);
    }

    #[test]
    fn test_multiply() {
        assert_eq!(usd(2599).times(2).unwrap(), usd(5198));
        assert!(matches!(
            usd(100).checked_mul(Decimal::NEGATIVE_ONE),
            Err(MoneyError::NegativeScalar(_))
        ));
    }

    #[test]
    fn test_divide() {
        assert_eq!(usd(1000).checked_div(Decimal::from(4)).unwrap(), usd(250));
        assert_eq!(
            usd(1000).checked_div(Decimal::ZERO),
            Err(MoneyError::DivisionByZero)
        );
        assert!(usd(1000).checked_div(Decimal::NEGATIVE_ONE).is_err());
    }

    #[test]
    fn test_ordering() {
        assert!(usd(2599) > usd(1550));
        assert!(usd(1550) <= usd(1550));
        assert_eq!(usd(1).try_cmp(&usd(2)).unwrap(), Ordering::Less);
    }

    #[test]
    fn test_hash_matches_equality() {
        let mut set = HashSet::new();
        set.insert(usd(1000));
        set.insert(Money::usd(Decimal::new(10, 0)).unwrap());
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_display() {
        assert_eq!(usd(2999).to_string(), "$29.99 USD");
        let pounds = Money::from_cents(500, Currency::GBP).unwrap();
        assert_eq!(pounds.to_string(), "£5.00 GBP");
    }

    #[test]
    fn test_sum() {
        let items = [usd(100), usd(250), usd(5)];
        assert_eq!(Money::sum(&items, Currency::USD).unwrap(), usd(355));
        assert_eq!(
            Money::sum(&[], Currency::USD).unwrap(),
            Money::zero(Currency::USD)
        );
    }

    #[test]
    fn test_currency_parse() {
        assert_eq!("usd".parse::<Currency>().unwrap(), Currency::USD);
        assert_eq!(" Eur ".parse::<Currency>().unwrap(), Currency::EUR);
        assert!(matches!(
            "XYZ".parse::<Currency>(),
            Err(MoneyError::UnknownCurrency(_))
        ));
    }

    #[test]
    fn test_serde_rejects_negative() {
        let json = serde_json::to_string(&usd(1234)).unwrap();
        assert_eq!(json, r#"{"amount":"12.34","currency":"USD"}"#);
        let parsed: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, usd(1234));

        let negative = r#"{"amount":"-1.00","currency":"USD"}"#;
        assert!(serde_json::from_str::<Money>(negative).is_err());
    }

    #[test]
    fn test_operators_match_checked_methods() {
        let a = usd(10_050);
        let b = usd(2_525);
        assert_eq!((a + b).unwrap(), usd(12_575));
        assert_eq!((a - b).unwrap(), usd(7_525));
        assert_eq!((a * 3u32).unwrap(), usd(30_150));
        assert_eq!((Decimal::TWO * b).unwrap(), usd(5_050));
        assert_eq!((a / Decimal::from(4)).unwrap(), usd(2_512));

        assert_eq!(b - a, Err(MoneyError::NegativeResult));
        assert_eq!(a / Decimal::ZERO, Err(MoneyError::DivisionByZero));
        let euros = Money::from_cents(100, Currency::EUR).unwrap();
        assert!(matches!(a + euros, Err(MoneyError::CurrencyMismatch { .. })));
    }

    proptest! {
        #[test]
        fn prop_add_sums_amounts(a in 0i64..1_000_000_000, b in 0i64..1_000_000_000) {
            let sum = usd(a).checked_add(&usd(b)).unwrap();
            prop_assert_eq!(sum.amount(), Decimal::new(a + b, 2));
        }

        #[test]
        fn prop_sub_larger_fails(a in 0i64..1_000_000, extra in 1i64..1_000_000) {
            prop_assert_eq!(
                usd(a).checked_sub(&usd(a + extra)),
                Err(MoneyError::NegativeResult)
            );
        }

        #[test]
        fn prop_equal_amounts_are_equal(a in 0i64..1_000_000_000) {
            prop_assert_eq!(usd(a), usd(a));
        }

        #[test]
        fn prop_negative_rejected(a in 1i64..1_000_000_000) {
            prop_assert!(Money::from_cents(-a, Currency::USD).is_err());
        }
    }
}
