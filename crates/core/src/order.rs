//! Orders and their lifecycle.
//!
//! An [`Order`] is placed from a user's [`Cart`]. It keeps its own copy of
//! the cart lines, so editing the cart afterwards does not change the order.
//!
//! ```text
//! Pending ──pay──> Paid ──ship──> Shipped ──deliver──> Delivered
//!    │  └─decline─> Payment Failed ──pay──┘
//!    └──────┴───────────┴──cancel──> Cancelled
//! ```

use core::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::cart::{Cart, CartItem, line_total};
use crate::error::ErrorKind;
use crate::payment::{Payable, PaymentResult};
use crate::types::{Address, Currency, Money, MoneyError, OrderId, OrderStatus, UserId};
use crate::user::User;

/// Errors that can occur while placing or progressing an order.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// Orders need at least one line.
    #[error("cannot create an order from an empty cart")]
    EmptyCart,

    /// Deactivated accounts cannot place orders.
    #[error("user {0} is not active")]
    InactiveUser(String),

    /// The cart was opened by a different user.
    #[error("cart belongs to user {owner}, not {user}")]
    CartOwnerMismatch {
        /// Owner recorded on the cart.
        owner: UserId,
        /// User placing the order.
        user: UserId,
    },

    /// `process_payment` was called before a payment method was set.
    #[error("no payment method set")]
    PaymentMethodMissing,

    /// The transition is not allowed from the current status.
    #[error("cannot {action} an order that is {from}")]
    InvalidTransition {
        /// Status the order was in.
        from: OrderStatus,
        /// Attempted action, e.g. `"ship"`.
        action: &'static str,
    },

    /// Tax rate outside `0 <= rate < 1`.
    #[error("tax rate must be in [0, 1) (got {0})")]
    InvalidTaxRate(Decimal),

    /// Price arithmetic failed.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

impl OrderError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyCart
            | Self::InactiveUser(_)
            | Self::CartOwnerMismatch { .. }
            | Self::PaymentMethodMissing
            | Self::InvalidTransition { .. } => ErrorKind::State,
            Self::InvalidTaxRate(_) | Self::Money(_) => ErrorKind::Validation,
        }
    }
}

/// Tax and shipping rules applied to an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingPolicy {
    tax_rate: Decimal,
    light_rate: Decimal,
    standard_rate: Decimal,
    heavy_rate: Decimal,
}

impl PricingPolicy {
    /// Heaviest parcel, in pounds, charged the light rate.
    pub const LIGHT_MAX_LB: f64 = 1.0;
    /// Heaviest parcel, in pounds, charged the standard rate.
    pub const STANDARD_MAX_LB: f64 = 5.0;

    /// Replace the tax rate.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::InvalidTaxRate` unless `0 <= rate < 1`.
    pub fn with_tax_rate(self, rate: Decimal) -> Result<Self, OrderError> {
        if rate < Decimal::ZERO || rate >= Decimal::ONE {
            return Err(OrderError::InvalidTaxRate(rate));
        }
        Ok(Self {
            tax_rate: rate,
            ..self
        })
    }

    #[must_use]
    pub const fn tax_rate(&self) -> Decimal {
        self.tax_rate
    }

    /// Shipping charge for a parcel of `weight` pounds.
    #[must_use]
    pub fn shipping_for(&self, weight: f64, currency: Currency) -> Money {
        let rate = if weight <= Self::LIGHT_MAX_LB {
            self.light_rate
        } else if weight <= Self::STANDARD_MAX_LB {
            self.standard_rate
        } else {
            self.heavy_rate
        };
        Money::from_parts(rate, currency)
    }

    /// Tax owed on `subtotal`.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::Overflow` if the product does not fit.
    pub fn tax_on(&self, subtotal: &Money) -> Result<Money, MoneyError> {
        subtotal.checked_mul(self.tax_rate)
    }
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            tax_rate: Decimal::new(85, 3),
            light_rate: Decimal::new(599, 2),
            standard_rate: Decimal::new(999, 2),
            heavy_rate: Decimal::new(1599, 2),
        }
    }
}

/// A placed order.
#[derive(Debug)]
pub struct Order {
    id: OrderId,
    customer_id: UserId,
    customer_name: String,
    items: Vec<CartItem>,
    currency: Currency,
    shipping_address: Address,
    pricing: PricingPolicy,
    payment_method: Option<Box<dyn Payable>>,
    status: OrderStatus,
    transaction_id: Option<String>,
    created_at: DateTime<Utc>,
}

impl Order {
    /// Place an order for everything currently in `cart`.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::EmptyCart` if the cart has no lines,
    /// `OrderError::InactiveUser` if the user is deactivated, and
    /// `OrderError::CartOwnerMismatch` if `cart` is not the user's.
    pub fn place(user: &User, cart: &Cart, shipping_address: Address) -> Result<Self, OrderError> {
        if !user.is_active() {
            return Err(OrderError::InactiveUser(user.username().to_owned()));
        }
        if cart.owner() != user.id() {
            return Err(OrderError::CartOwnerMismatch {
                owner: cart.owner(),
                user: user.id(),
            });
        }
        if cart.is_empty() {
            return Err(OrderError::EmptyCart);
        }

        let order = Self {
            id: OrderId::generate(),
            customer_id: user.id(),
            customer_name: user.username().to_owned(),
            items: cart.items().to_vec(),
            currency: cart.currency(),
            shipping_address,
            pricing: PricingPolicy::default(),
            payment_method: None,
            status: OrderStatus::Pending,
            transaction_id: None,
            created_at: Utc::now(),
        };
        tracing::info!(
            order_id = %order.id,
            customer = %order.customer_name,
            lines = order.items.len(),
            "Order placed"
        );
        Ok(order)
    }

    /// Use `pricing` instead of the default tax and shipping rules.
    #[must_use]
    pub const fn with_pricing(mut self, pricing: PricingPolicy) -> Self {
        self.pricing = pricing;
        self
    }

    #[must_use]
    pub const fn id(&self) -> OrderId {
        self.id
    }

    #[must_use]
    pub const fn customer_id(&self) -> UserId {
        self.customer_id
    }

    #[must_use]
    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub const fn shipping_address(&self) -> &Address {
        &self.shipping_address
    }

    #[must_use]
    pub const fn status(&self) -> OrderStatus {
        self.status
    }

    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Id of the approved payment, once paid.
    #[must_use]
    pub fn transaction_id(&self) -> Option<&str> {
        self.transaction_id.as_deref()
    }

    /// Attach (or replace) the payment method.
    pub fn set_payment_method(&mut self, method: Box<dyn Payable>) {
        tracing::debug!(order_id = %self.id, method = %method.method(), "Payment method set");
        self.payment_method = Some(method);
    }

    /// Sum of line totals.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::Overflow` if the sum does not fit.
    pub fn subtotal(&self) -> Result<Money, OrderError> {
        Ok(line_total(&self.items, self.currency)?)
    }

    /// Total shipping weight in pounds.
    #[must_use]
    pub fn shipping_weight(&self) -> f64 {
        self.items.iter().map(CartItem::shipping_weight).sum()
    }

    #[must_use]
    pub fn shipping(&self) -> Money {
        self.pricing
            .shipping_for(self.shipping_weight(), self.currency)
    }

    /// Tax on the subtotal.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::Money` if the arithmetic overflows.
    pub fn tax(&self) -> Result<Money, OrderError> {
        Ok(self.pricing.tax_on(&self.subtotal()?)?)
    }

    /// `subtotal + shipping + tax`.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::Money` if the arithmetic overflows.
    pub fn total(&self) -> Result<Money, OrderError> {
        let subtotal = self.subtotal()?;
        let tax = self.pricing.tax_on(&subtotal)?;
        Ok(subtotal.checked_add(&self.shipping())?.checked_add(&tax)?)
    }

    /// Charge the order total through the payment method.
    ///
    /// An approved payment moves the order to `Paid`; a decline moves it to
    /// `Payment Failed`, from which payment can be retried.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::InvalidTransition` unless the order is `Pending`
    /// or `Payment Failed`, and `OrderError::PaymentMethodMissing` if no
    /// method is set.
    pub fn process_payment(&mut self) -> Result<PaymentResult, OrderError> {
        self.ensure(self.status.can_pay(), "pay for")?;
        let total = self.total()?;
        let method = self
            .payment_method
            .as_ref()
            .ok_or(OrderError::PaymentMethodMissing)?;

        let result = method.process_payment(&total);
        match &result {
            PaymentResult::Approved(receipt) => {
                self.transaction_id = Some(receipt.transaction_id.clone());
                self.transition(OrderStatus::Paid);
            }
            PaymentResult::Declined { reason, .. } => {
                tracing::warn!(order_id = %self.id, %reason, "Payment declined");
                self.transition(OrderStatus::PaymentFailed);
            }
        }
        Ok(result)
    }

    /// Mark a paid order as shipped.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::InvalidTransition` unless the order is `Paid`.
    pub fn ship(&mut self) -> Result<(), OrderError> {
        self.ensure(self.status == OrderStatus::Paid, "ship")?;
        self.transition(OrderStatus::Shipped);
        Ok(())
    }

    /// Mark a shipped order as delivered.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::InvalidTransition` unless the order is `Shipped`.
    pub fn deliver(&mut self) -> Result<(), OrderError> {
        self.ensure(self.status == OrderStatus::Shipped, "deliver")?;
        self.transition(OrderStatus::Delivered);
        Ok(())
    }

    /// Cancel an order that has not shipped.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::InvalidTransition` once the order has shipped or
    /// is already cancelled.
    pub fn cancel(&mut self) -> Result<(), OrderError> {
        self.ensure(self.status.can_cancel(), "cancel")?;
        self.transition(OrderStatus::Cancelled);
        Ok(())
    }

    const fn ensure(&self, allowed: bool, action: &'static str) -> Result<(), OrderError> {
        if allowed {
            Ok(())
        } else {
            Err(OrderError::InvalidTransition {
                from: self.status,
                action,
            })
        }
    }

    fn transition(&mut self, to: OrderStatus) {
        tracing::info!(order_id = %self.id, from = %self.status, %to, "Order status changed");
        self.status = to;
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Order {} ({})", self.id.short(), self.status)?;
        writeln!(f, "Customer: {}", self.customer_name)?;
        writeln!(f, "Ship to: {}", self.shipping_address)?;
        for item in &self.items {
            writeln!(f, "  {item}")?;
        }
        let (Ok(subtotal), Ok(tax), Ok(total)) = (self.subtotal(), self.tax(), self.total()) else {
            return write!(f, "Total: unavailable");
        };
        writeln!(f, "Subtotal: {subtotal}")?;
        writeln!(f, "Shipping: {}", self.shipping())?;
        writeln!(f, "Tax: {tax}")?;
        write!(f, "Total: {total}")
    }
}
