//! Shopping cart.
//!
//! A [`Cart`] is an ordered list of line items, one per distinct product.
//! Products are shared, not owned: the cart holds a [`SharedProduct`] handle
//! and the price each line is charged at.

use core::fmt;
use std::ops::{Add, Index};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::error::ErrorKind;
use crate::product::{Discountable, ProductError, SharedProduct};
use crate::types::{Currency, Money, MoneyError, UserId};

/// Errors that can occur during cart operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    /// The product is marked out of stock.
    #[error("{0} is out of stock")]
    OutOfStock(String),

    /// Quantities added to a cart must be positive.
    #[error("quantity must be positive")]
    InvalidQuantity,

    /// A line's quantity would not fit in a `u32`.
    #[error("quantity of {0} would overflow")]
    QuantityOverflow(String),

    /// The product has no line in this cart.
    #[error("{0} is not in the cart")]
    NotInCart(String),

    #[error("no cart line at index {index} (cart has {len})")]
    NoSuchLine { index: usize, len: usize },

    /// Price arithmetic failed (including mixing currencies).
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// Discount rejected by the product.
    #[error(transparent)]
    Product(#[from] ProductError),
}

impl CartError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::OutOfStock(_) | Self::NotInCart(_) => ErrorKind::State,
            Self::InvalidQuantity
            | Self::QuantityOverflow(_)
            | Self::NoSuchLine { .. }
            | Self::Money(_)
            | Self::Product(_) => ErrorKind::Validation,
        }
    }
}

/// One product line.
#[derive(Debug, Clone)]
pub struct CartItem {
    product: SharedProduct,
    quantity: u32,
    unit_price: Money,
}

impl CartItem {
    fn new(product: &SharedProduct, quantity: u32) -> Self {
        Self {
            product: Arc::clone(product),
            quantity,
            unit_price: product.price(),
        }
    }

    #[must_use]
    pub fn product(&self) -> &SharedProduct {
        &self.product
    }

    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Price charged per unit. Starts at the catalog price; a cart discount
    /// lowers it for this line only.
    #[must_use]
    pub const fn unit_price(&self) -> Money {
        self.unit_price
    }

    /// `unit_price × quantity`.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::Overflow` if the product does not fit.
    pub fn total_price(&self) -> Result<Money, MoneyError> {
        self.unit_price.times(self.quantity)
    }

    /// Total shipping weight of this line in pounds.
    #[must_use]
    pub fn shipping_weight(&self) -> f64 {
        self.product.shipping_weight() * f64::from(self.quantity)
    }

    /// Whether this line holds `product` itself, not merely a product with
    /// the same id.
    #[must_use]
    pub fn is_for(&self, product: &SharedProduct) -> bool {
        Arc::ptr_eq(&self.product, product)
    }

    fn grow(&mut self, quantity: u32) -> Result<(), CartError> {
        self.quantity = self
            .quantity
            .checked_add(quantity)
            .ok_or_else(|| CartError::QuantityOverflow(self.product.name().to_owned()))?;
        Ok(())
    }
}

impl fmt::Display for CartItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.total_price() {
            Ok(total) => write!(f, "{} x{} = {total}", self.product.name(), self.quantity),
            Err(_) => write!(f, "{} x{}", self.product.name(), self.quantity),
        }
    }
}

/// A customer's cart. All lines share the cart's currency.
///
/// Lines are keyed on the shared product handle, so two catalog entries
/// that happen to carry the same [`ProductId`](crate::ProductId) stay on
/// separate lines.
#[derive(Debug, Clone)]
pub struct Cart {
    owner: UserId,
    currency: Currency,
    items: Vec<CartItem>,
    created_at: DateTime<Utc>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new(owner: UserId, currency: Currency) -> Self {
        Self {
            owner,
            currency,
            items: Vec::new(),
            created_at: Utc::now(),
        }
    }

    #[must_use]
    pub const fn owner(&self) -> UserId {
        self.owner
    }

    #[must_use]
    pub const fn currency(&self) -> Currency {
        self.currency
    }

    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Add `quantity` units, merging into an existing line for the same
    /// product.
    ///
    /// # Errors
    ///
    /// Returns `CartError::InvalidQuantity` for zero,
    /// `CartError::OutOfStock` if the product is unavailable,
    /// `CartError::Money` if its price is in another currency, and
    /// `CartError::QuantityOverflow` if the merged quantity does not fit.
    pub fn add_item(&mut self, product: &SharedProduct, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }
        if !product.in_stock() {
            return Err(CartError::OutOfStock(product.name().to_owned()));
        }
        self.ensure_currency(product.price().currency())?;

        if let Some(line) = self.line_mut(product) {
            line.grow(quantity)?;
        } else {
            self.items.push(CartItem::new(product, quantity));
        }
        tracing::debug!(product_id = %product.id(), quantity, "Added to cart");
        Ok(())
    }

    /// Drop the line for `product`. Absent products are ignored.
    pub fn remove_item(&mut self, product: &SharedProduct) {
        self.items.retain(|item| !item.is_for(product));
    }

    /// Set a line's quantity; zero removes the line.
    ///
    /// # Errors
    ///
    /// Returns `CartError::NotInCart` if there is no line for `product`.
    pub fn update_quantity(
        &mut self,
        product: &SharedProduct,
        quantity: u32,
    ) -> Result<(), CartError> {
        if !self.contains(product) {
            return Err(CartError::NotInCart(product.name().to_owned()));
        }
        if quantity == 0 {
            self.remove_item(product);
            return Ok(());
        }
        if let Some(line) = self.line_mut(product) {
            line.quantity = quantity;
        }
        Ok(())
    }

    /// Set the quantity of the line at `index`; zero removes the line.
    ///
    /// # Errors
    ///
    /// Returns `CartError::NoSuchLine` if `index` is out of range.
    pub fn set_quantity_at(&mut self, index: usize, quantity: u32) -> Result<(), CartError> {
        let len = self.items.len();
        if quantity == 0 {
            return self.remove_at(index).map(drop);
        }
        let line = self
            .items
            .get_mut(index)
            .ok_or(CartError::NoSuchLine { index, len })?;
        line.quantity = quantity;
        Ok(())
    }

    /// Remove and return the line at `index`.
    ///
    /// # Errors
    ///
    /// Returns `CartError::NoSuchLine` if `index` is out of range.
    pub fn remove_at(&mut self, index: usize) -> Result<CartItem, CartError> {
        let len = self.items.len();
        if index >= len {
            return Err(CartError::NoSuchLine { index, len });
        }
        Ok(self.items.remove(index))
    }

    /// Reprice one line at `percentage` off the catalog price. The catalog
    /// item itself is not modified.
    ///
    /// # Errors
    ///
    /// Returns `CartError::NotInCart` if there is no line for `product` and
    /// `CartError::Product` for an out-of-range percentage.
    pub fn apply_discount_to_item(
        &mut self,
        product: &SharedProduct,
        percentage: Decimal,
    ) -> Result<Money, CartError> {
        let line = self
            .line_mut(product)
            .ok_or_else(|| CartError::NotInCart(product.name().to_owned()))?;
        let discounted = line.product.apply_discount(percentage)?;
        line.unit_price = discounted;
        tracing::debug!(product_id = %product.id(), %percentage, "Discount applied to cart line");
        Ok(discounted)
    }

    /// Fold every line of `other` into this cart. Lines for a product
    /// already here add their quantity and keep this cart's unit price;
    /// new lines keep the price they had in `other`.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Money` if the carts use different currencies and
    /// `CartError::QuantityOverflow` if a merged quantity does not fit. The
    /// cart is unchanged on error.
    pub fn merge(&mut self, other: &Self) -> Result<(), CartError> {
        self.ensure_currency(other.currency)?;
        let mut merged = self.items.clone();
        for item in &other.items {
            match merged.iter_mut().find(|line| line.is_for(&item.product)) {
                Some(line) => line.grow(item.quantity)?,
                None => merged.push(item.clone()),
            }
        }
        self.items = merged;
        tracing::debug!(lines = self.items.len(), "Carts merged");
        Ok(())
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Whether the cart has a line for `product`.
    #[must_use]
    pub fn contains(&self, product: &SharedProduct) -> bool {
        self.items.iter().any(|item| item.is_for(product))
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&CartItem> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CartItem> {
        self.items.iter()
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Number of distinct product lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Sum of line totals; zero for an empty cart.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::Overflow` if the sum does not fit.
    pub fn total(&self) -> Result<Money, MoneyError> {
        line_total(&self.items, self.currency)
    }

    fn ensure_currency(&self, currency: Currency) -> Result<(), CartError> {
        if currency != self.currency {
            return Err(MoneyError::CurrencyMismatch {
                left: self.currency,
                right: currency,
            }
            .into());
        }
        Ok(())
    }

    fn line_mut(&mut self, product: &SharedProduct) -> Option<&mut CartItem> {
        self.items.iter_mut().find(|item| item.is_for(product))
    }
}

/// Fold-sum of line totals in `currency`.
pub(crate) fn line_total(items: &[CartItem], currency: Currency) -> Result<Money, MoneyError> {
    items.iter().try_fold(Money::zero(currency), |acc, item| {
        acc.checked_add(&item.total_price()?)
    })
}

/// `a + b` is [`Cart::merge`] on a copy of `a`; the result keeps `a`'s owner.
impl Add<&Cart> for Cart {
    type Output = Result<Self, CartError>;

    fn add(mut self, other: &Cart) -> Self::Output {
        self.merge(other)?;
        Ok(self)
    }
}

impl Index<usize> for Cart {
    type Output = CartItem;

    #[allow(clippy::indexing_slicing)]
    fn index(&self, index: usize) -> &Self::Output {
        &self.items[index]
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartItem;
    type IntoIter = std::slice::Iter<'a, CartItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl fmt::Display for Cart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.items.is_empty() {
            return f.write_str("Empty shopping cart");
        }
        writeln!(f, "Shopping cart:")?;
        for item in &self.items {
            writeln!(f, "  {item}")?;
        }
        if let Ok(total) = self.total() {
            writeln!(f, "Total: {total}")?;
        }
        write!(f, "Items: {}", self.item_count())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::product::{Book, Clothing, Product};
    use crate::types::IdSequence;

    fn usd(cents: i64) -> Money {
        Money::from_cents(cents, Currency::USD).unwrap()
    }

    struct Catalog {
        book: SharedProduct,
        shirt: SharedProduct,
    }

    fn catalog() -> Catalog {
        let ids = IdSequence::default();
        Catalog {
            book: Arc::new(Book::new(
                ids.next_id(),
                "Object Design Handbook",
                "John Doe",
                "978-1234567890",
                usd(2999),
                350,
            )),
            shirt: Arc::new(
                Clothing::new(
                    ids.next_id(),
                    "Cotton T-Shirt",
                    "FashionCo",
                    "L",
                    "Blue",
                    usd(1999),
                    "Cotton",
                )
                .unwrap(),
            ),
        }
    }

    fn empty_cart() -> Cart {
        Cart::new(UserId::generate(), Currency::USD)
    }

    #[test]
    fn test_empty_cart_totals_zero() {
        let cart = empty_cart();
        assert!(cart.is_empty());
        assert_eq!(cart.total().unwrap(), Money::zero(Currency::USD));
        assert_eq!(cart.to_string(), "Empty shopping cart");
    }

    #[test]
    fn test_same_product_merges() {
        let c = catalog();
        let mut cart = empty_cart();
        cart.add_item(&c.book, 2).unwrap();
        cart.add_item(&c.book, 1).unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart[0].quantity(), 3);
    }

    #[test]
    fn test_len_counts_lines_not_units() {
        let c = catalog();
        let mut cart = empty_cart();
        cart.add_item(&c.book, 2).unwrap();
        cart.add_item(&c.shirt, 3).unwrap();
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.item_count(), 5);
        assert_eq!(cart.total().unwrap(), usd(2999 * 2 + 1999 * 3));
    }

    #[test]
    fn test_out_of_stock_rejected() {
        let c = catalog();
        c.book.set_in_stock(false);
        let mut cart = empty_cart();
        assert_eq!(
            cart.add_item(&c.book, 1),
            Err(CartError::OutOfStock("Object Design Handbook".to_owned()))
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let c = catalog();
        let mut cart = empty_cart();
        assert_eq!(cart.add_item(&c.book, 0), Err(CartError::InvalidQuantity));
    }

    #[test]
    fn test_currency_enforced() {
        let c = catalog();
        let mut cart = Cart::new(UserId::generate(), Currency::EUR);
        let err = cart.add_item(&c.book, 1).unwrap_err();
        assert!(matches!(err, CartError::Money(MoneyError::CurrencyMismatch { .. })));
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let c = catalog();
        let mut cart = empty_cart();
        cart.add_item(&c.book, 1).unwrap();
        cart.remove_item(&c.shirt);
        assert_eq!(cart.len(), 1);
        cart.remove_item(&c.book);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity() {
        let c = catalog();
        let mut cart = empty_cart();
        cart.add_item(&c.book, 1).unwrap();
        cart.update_quantity(&c.book, 5).unwrap();
        assert_eq!(cart[0].quantity(), 5);

        assert_eq!(
            cart.update_quantity(&c.shirt, 2),
            Err(CartError::NotInCart("Cotton T-Shirt".to_owned()))
        );

        cart.update_quantity(&c.book, 0).unwrap();
        assert!(!cart.contains(&c.book));
    }

    #[test]
    fn test_discount_reprices_line_only() {
        let c = catalog();
        let mut cart = empty_cart();
        cart.add_item(&c.book, 2).unwrap();

        let price = cart
            .apply_discount_to_item(&c.book, Decimal::TEN)
            .unwrap();
        assert_eq!(price, usd(2699));
        assert_eq!(cart.total().unwrap(), usd(5398));
        assert_eq!(c.book.price(), usd(2999));

        // Applying again starts from the catalog price.
        cart.apply_discount_to_item(&c.book, Decimal::TEN)
            .unwrap();
        assert_eq!(cart[0].unit_price(), usd(2699));
    }

    #[test]
    fn test_iteration_and_lookup() {
        let c = catalog();
        let mut cart = empty_cart();
        cart.add_item(&c.book, 2).unwrap();
        cart.add_item(&c.shirt, 1).unwrap();

        let names: Vec<&str> = (&cart).into_iter().map(|i| i.product().name()).collect();
        assert_eq!(names, ["Object Design Handbook", "Cotton T-Shirt"]);
        assert!(cart.get(2).is_none());
        assert_eq!(cart.get(1).unwrap().to_string(), "Cotton T-Shirt x1 = $19.99 USD");

        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_products_sharing_an_id_keep_separate_lines() {
        let book: SharedProduct = Arc::new(Book::new(
            IdSequence::default().next_id(),
            "Object Design Handbook",
            "John Doe",
            "978-1234567890",
            usd(2999),
            350,
        ));
        let shirt: SharedProduct = Arc::new(
            Clothing::new(
                IdSequence::default().next_id(),
                "Cotton T-Shirt",
                "FashionCo",
                "L",
                "Blue",
                usd(1999),
                "Cotton",
            )
            .unwrap(),
        );
        assert_eq!(book.id(), shirt.id());

        let mut cart = empty_cart();
        cart.add_item(&book, 1).unwrap();
        assert!(!cart.contains(&shirt));

        cart.add_item(&shirt, 1).unwrap();
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.total().unwrap(), usd(2999 + 1999));
        assert_eq!(cart[1].to_string(), "Cotton T-Shirt x1 = $19.99 USD");

        cart.remove_item(&book);
        assert_eq!(cart.len(), 1);
        assert!(cart.contains(&shirt));
    }

    #[test]
    fn test_quantity_overflow_rejected() {
        let c = catalog();
        let mut cart = empty_cart();
        cart.add_item(&c.book, u32::MAX).unwrap();
        assert_eq!(
            cart.add_item(&c.book, 1),
            Err(CartError::QuantityOverflow("Object Design Handbook".to_owned()))
        );
        assert_eq!(cart[0].quantity(), u32::MAX);
        assert_eq!(
            CartError::QuantityOverflow(String::new()).kind(),
            ErrorKind::Validation
        );
    }

    #[test]
    fn test_set_and_remove_by_index() {
        let c = catalog();
        let mut cart = empty_cart();
        cart.add_item(&c.book, 1).unwrap();
        cart.add_item(&c.shirt, 1).unwrap();

        cart.set_quantity_at(1, 4).unwrap();
        assert_eq!(cart[1].quantity(), 4);
        assert_eq!(
            cart.set_quantity_at(5, 1),
            Err(CartError::NoSuchLine { index: 5, len: 2 })
        );

        let removed = cart.remove_at(0).unwrap();
        assert!(removed.is_for(&c.book));
        assert_eq!(cart.len(), 1);

        cart.set_quantity_at(0, 0).unwrap();
        assert!(cart.is_empty());
        assert!(cart.remove_at(0).is_err());
    }

    #[test]
    fn test_merge_adds_quantities_and_lines() {
        let c = catalog();
        let mut mine = empty_cart();
        mine.add_item(&c.book, 1).unwrap();
        mine.apply_discount_to_item(&c.book, Decimal::TEN).unwrap();

        let mut theirs = empty_cart();
        theirs.add_item(&c.book, 2).unwrap();
        theirs.add_item(&c.shirt, 1).unwrap();

        let combined = (mine.clone() + &theirs).unwrap();
        assert_eq!(combined.owner(), mine.owner());
        assert_eq!(combined.len(), 2);
        assert_eq!(combined[0].quantity(), 3);
        assert_eq!(combined[0].unit_price(), usd(2699));
        assert_eq!(combined.total().unwrap(), usd(2699 * 3 + 1999));
        assert_eq!(theirs.len(), 2);

        let euros = Cart::new(UserId::generate(), Currency::EUR);
        let err = mine.merge(&euros).unwrap_err();
        assert!(matches!(err, CartError::Money(MoneyError::CurrencyMismatch { .. })));
        assert_eq!(mine.len(), 1);
    }
}
