//! Product catalog.
//!
//! Every catalog item implements [`Product`]: it exposes its shared
//! [`Listing`] (id, name, price, description, stock flag) and must supply a
//! category tag and a shipping weight. Those two are required trait methods,
//! so a product type that forgets them does not compile:
//!
//! ```compile_fail
//! use bazaar_core::product::{Listing, Product};
//!
//! #[derive(Debug)]
//! struct Mystery {
//!     listing: Listing,
//! }
//!
//! impl Product for Mystery {
//!     fn listing(&self) -> &Listing {
//!         &self.listing
//!     }
//! }
//! ```
//!
//! Products are shared between the catalog, carts, and orders as
//! [`SharedProduct`]. The only field that changes after construction is the
//! stock flag, which is atomic.

use core::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ErrorKind;
use crate::types::{Money, MoneyError, ProductId};

/// A product handle shared by the catalog, carts, and orders.
pub type SharedProduct = Arc<dyn Product>;

/// Errors raised by catalog operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProductError {
    /// Discount outside 0-100 percent.
    #[error("discount percentage must be between 0 and 100 (got {0})")]
    InvalidDiscount(Decimal),
    /// Clothing size not in the fixed size chart.
    #[error("size must be one of: {valid} (got {given})", valid = ClothingSize::chart())]
    InvalidSize {
        /// The rejected input.
        given: String,
    },
    /// Shipping weight that is zero, negative, NaN, or infinite.
    #[error("shipping weight must be a positive finite number of pounds (got {0})")]
    InvalidWeight(String),
    /// Price arithmetic failed.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

impl ProductError {
    /// Every product error is a validation failure.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }
}

/// Fields common to every product.
#[derive(Debug)]
pub struct Listing {
    id: ProductId,
    name: String,
    price: Money,
    description: String,
    in_stock: AtomicBool,
}

impl Listing {
    /// Create a listing that starts in stock.
    #[must_use]
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        price: Money,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            description: description.into(),
            in_stock: AtomicBool::new(true),
        }
    }
}

/// The catalog contract.
pub trait Product: fmt::Debug + Send + Sync {
    /// Shared listing data.
    fn listing(&self) -> &Listing;

    /// Category tag, e.g. `"Books"`.
    fn category(&self) -> &'static str;

    /// Shipping weight in pounds.
    fn shipping_weight(&self) -> f64;

    /// One-line description used in listings.
    fn summary(&self) -> String {
        let status = if self.in_stock() {
            "In Stock"
        } else {
            "Out of Stock"
        };
        format!("{} - {} ({status})", self.name(), self.price())
    }

    fn id(&self) -> ProductId {
        self.listing().id
    }

    fn name(&self) -> &str {
        &self.listing().name
    }

    fn price(&self) -> Money {
        self.listing().price
    }

    fn description(&self) -> &str {
        &self.listing().description
    }

    fn in_stock(&self) -> bool {
        self.listing().in_stock.load(Ordering::Relaxed)
    }

    /// Mark the product as in or out of stock.
    fn set_in_stock(&self, in_stock: bool) {
        self.listing().in_stock.store(in_stock, Ordering::Relaxed);
    }
}

impl fmt::Display for dyn Product + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

/// Anything whose price can be discounted.
///
/// Discounting never changes the stored price; it returns the discounted
/// amount for the caller to use.
pub trait Discountable {
    /// Price after taking `percentage` percent off.
    ///
    /// # Errors
    ///
    /// Returns `ProductError::InvalidDiscount` unless `0 <= percentage <= 100`.
    fn apply_discount(&self, percentage: Decimal) -> Result<Money, ProductError>;

    /// Price before any discount.
    fn original_price(&self) -> Money;
}

impl<P: Product + ?Sized> Discountable for P {
    fn apply_discount(&self, percentage: Decimal) -> Result<Money, ProductError> {
        if percentage < Decimal::ZERO || percentage > Decimal::ONE_HUNDRED {
            return Err(ProductError::InvalidDiscount(percentage));
        }
        let keep = (Decimal::ONE_HUNDRED - percentage) / Decimal::ONE_HUNDRED;
        Ok(self.price().checked_mul(keep)?)
    }

    fn original_price(&self) -> Money {
        self.price()
    }
}

// =============================================================================
// Books
// =============================================================================

/// A printed book. Shipping weight scales with page count.
#[derive(Debug)]
pub struct Book {
    listing: Listing,
    author: String,
    isbn: String,
    pages: u32,
}

impl Book {
    /// Lightest shipping weight for any book, in pounds.
    pub const MIN_WEIGHT: f64 = 0.5;
    /// Pounds per page.
    pub const WEIGHT_PER_PAGE: f64 = 0.005;

    #[must_use]
    pub fn new(
        id: ProductId,
        title: impl Into<String>,
        author: impl Into<String>,
        isbn: impl Into<String>,
        price: Money,
        pages: u32,
    ) -> Self {
        let author = author.into();
        let description = format!("By {author}");
        Self {
            listing: Listing::new(id, title, price, description),
            author,
            isbn: isbn.into(),
            pages,
        }
    }

    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    #[must_use]
    pub fn isbn(&self) -> &str {
        &self.isbn
    }

    #[must_use]
    pub const fn pages(&self) -> u32 {
        self.pages
    }
}

impl Product for Book {
    fn listing(&self) -> &Listing {
        &self.listing
    }

    fn category(&self) -> &'static str {
        "Books"
    }

    fn shipping_weight(&self) -> f64 {
        (f64::from(self.pages) * Self::WEIGHT_PER_PAGE).max(Self::MIN_WEIGHT)
    }

    fn summary(&self) -> String {
        format!("\"{}\" by {} - {}", self.name(), self.author, self.price())
    }
}

// =============================================================================
// Electronics
// =============================================================================

/// A device with a manufacturer warranty. Ships at its actual weight.
#[derive(Debug)]
pub struct Electronics {
    listing: Listing,
    brand: String,
    model: String,
    weight: f64,
    warranty_months: u32,
}

impl Electronics {
    /// Warranty when none is specified.
    pub const DEFAULT_WARRANTY_MONTHS: u32 = 12;

    /// `weight` is the shipping weight in pounds.
    ///
    /// # Errors
    ///
    /// Returns `ProductError::InvalidWeight` unless `weight` is positive and
    /// finite.
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        brand: impl Into<String>,
        model: impl Into<String>,
        price: Money,
        weight: f64,
        warranty_months: u32,
    ) -> Result<Self, ProductError> {
        if !(weight.is_finite() && weight > 0.0) {
            return Err(ProductError::InvalidWeight(weight.to_string()));
        }
        let brand = brand.into();
        let model = model.into();
        let description = format!("{brand} {model}");
        Ok(Self {
            listing: Listing::new(id, name, price, description),
            brand,
            model,
            weight,
            warranty_months,
        })
    }

    #[must_use]
    pub fn brand(&self) -> &str {
        &self.brand
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    #[must_use]
    pub const fn warranty_months(&self) -> u32 {
        self.warranty_months
    }

    /// Lengthen the warranty.
    pub const fn extend_warranty(&mut self, additional_months: u32) {
        self.warranty_months = self.warranty_months.saturating_add(additional_months);
    }
}

impl Product for Electronics {
    fn listing(&self) -> &Listing {
        &self.listing
    }

    fn category(&self) -> &'static str {
        "Electronics"
    }

    fn shipping_weight(&self) -> f64 {
        self.weight
    }
}

// =============================================================================
// Clothing
// =============================================================================

/// Fixed clothing size chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClothingSize {
    XS,
    S,
    M,
    L,
    XL,
    XXL,
}

impl ClothingSize {
    /// Every size, smallest first.
    pub const ALL: [Self; 6] = [Self::XS, Self::S, Self::M, Self::L, Self::XL, Self::XXL];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::XS => "XS",
            Self::S => "S",
            Self::M => "M",
            Self::L => "L",
            Self::XL => "XL",
            Self::XXL => "XXL",
        }
    }

    fn chart() -> String {
        Self::ALL.map(Self::label).join(", ")
    }
}

impl fmt::Display for ClothingSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for ClothingSize {
    type Err = ProductError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|size| size.label() == s)
            .ok_or_else(|| ProductError::InvalidSize {
                given: s.to_owned(),
            })
    }
}

/// A garment. Every garment ships at a flat weight.
#[derive(Debug)]
pub struct Clothing {
    listing: Listing,
    brand: String,
    size: ClothingSize,
    color: String,
    material: String,
}

impl Clothing {
    /// Flat shipping weight in pounds.
    pub const SHIPPING_WEIGHT: f64 = 0.8;

    /// Create a garment.
    ///
    /// # Errors
    ///
    /// Returns `ProductError::InvalidSize` if `size` is not on the chart.
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        brand: impl Into<String>,
        size: &str,
        color: impl Into<String>,
        price: Money,
        material: impl Into<String>,
    ) -> Result<Self, ProductError> {
        let size: ClothingSize = size.parse()?;
        let brand = brand.into();
        let color = color.into();
        let material = material.into();
        let description = format!("{brand} {color} {material}");
        Ok(Self {
            listing: Listing::new(id, name, price, description),
            brand,
            size,
            color,
            material,
        })
    }

    #[must_use]
    pub fn brand(&self) -> &str {
        &self.brand
    }

    #[must_use]
    pub const fn size(&self) -> ClothingSize {
        self.size
    }

    #[must_use]
    pub fn color(&self) -> &str {
        &self.color
    }

    #[must_use]
    pub fn material(&self) -> &str {
        &self.material
    }
}

impl Product for Clothing {
    fn listing(&self) -> &Listing {
        &self.listing
    }

    fn category(&self) -> &'static str {
        "Clothing"
    }

    fn shipping_weight(&self) -> f64 {
        Self::SHIPPING_WEIGHT
    }
}
