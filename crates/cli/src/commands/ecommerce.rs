//! Storefront walkthrough: catalog, user, cart, order, payment.
//!
//! # Usage
//!
//! ```bash
//! bazaar demo ecommerce
//! ```

use std::io::Write;
use std::sync::Arc;

use bazaar_core::cart::Cart;
use bazaar_core::order::Order;
use bazaar_core::payment::{CreditCard, Payable, PayPal};
use bazaar_core::product::{Book, Clothing, Discountable, Electronics, Product, SharedProduct};
use bazaar_core::user::User;
use bazaar_core::{Address, IdSequence, Money, ProductId};
use chrono::{Datelike, Utc};
use rust_decimal::Decimal;

use super::{DemoResult, heading};
use crate::config::CliConfig;

/// Run the storefront walkthrough.
///
/// # Errors
///
/// Returns an error if writing fails or a step the walkthrough expects to
/// succeed does not.
pub fn run(out: &mut impl Write, config: &CliConfig) -> DemoResult {
    let price = |cents| Money::from_cents(cents, config.currency);
    let ids: IdSequence<ProductId> = IdSequence::default();

    heading(out, "1. PRODUCT CATALOG")?;
    let book: SharedProduct = Arc::new(Book::new(
        ids.next_id(),
        "Object Design Handbook",
        "John Doe",
        "978-1234567890",
        price(2999)?,
        350,
    ));
    let laptop: SharedProduct = Arc::new(Electronics::new(
        ids.next_id(),
        "Gaming Laptop",
        "TechBrand",
        "GX-3000",
        price(129_999)?,
        5.5,
        24,
    )?);
    let shirt: SharedProduct = Arc::new(Clothing::new(
        ids.next_id(),
        "Cotton T-Shirt",
        "FashionCo",
        "L",
        "Blue",
        price(1999)?,
        "Cotton",
    )?);
    for product in [&book, &laptop, &shirt] {
        writeln!(
            out,
            "  [{}] {} ({:.2} lb)",
            product.category(),
            product,
            product.shipping_weight()
        )?;
    }

    heading(out, "2. USER ACCOUNT")?;
    let mut user = User::new("john_smith", "john@example.com", "securepass123")?;
    let home = Address::new("123 Main St", "Anytown", "CA", "12345");
    user.add_address(home.clone());
    writeln!(out, "  {user}")?;
    writeln!(out, "  Address: {home}")?;
    writeln!(
        out,
        "  Password check (correct): {}",
        user.verify_password("securepass123")
    )?;
    writeln!(
        out,
        "  Password check (wrong): {}",
        user.verify_password("wrongpassword")
    )?;
    if let Err(e) = User::new("jane", "not-an-email", "securepass123") {
        writeln!(out, "  Rejected registration: {e}")?;
    }

    heading(out, "3. SHOPPING CART")?;
    let mut cart = Cart::new(user.id(), config.currency);
    cart.add_item(&book, 2)?;
    cart.add_item(&shirt, 1)?;
    cart.add_item(&book, 1)?;
    writeln!(out, "{cart}")?;
    writeln!(out, "  Lines: {}, units: {}", cart.len(), cart.item_count())?;

    let discounted = shirt.apply_discount(Decimal::TEN)?;
    writeln!(
        out,
        "  10% off {}: {} -> {discounted} (catalog price stays {})",
        shirt.name(),
        shirt.original_price(),
        shirt.price()
    )?;
    cart.apply_discount_to_item(&shirt, Decimal::TEN)?;
    cart.update_quantity(&book, 2)?;
    writeln!(out, "  Cart total after discount: {}", cart.total()?)?;

    let mut saved = Cart::new(user.id(), config.currency);
    saved.add_item(&shirt, 2)?;
    let mut combined = (cart.clone() + &saved)?;
    writeln!(
        out,
        "  Combined with a saved cart: {} lines, {} units",
        combined.len(),
        combined.item_count()
    )?;
    combined.set_quantity_at(0, 1)?;
    let removed = combined.remove_at(1)?;
    writeln!(
        out,
        "  Trimmed by position: removed {}, {} units left",
        removed.product().name(),
        combined.item_count()
    )?;

    laptop.set_in_stock(false);
    if let Err(e) = cart.add_item(&laptop, 1) {
        writeln!(out, "  Could not add laptop: {e}")?;
    }

    heading(out, "4. ORDER")?;
    let mut order = Order::place(&user, &cart, home)?.with_pricing(config.pricing);
    cart.clear();
    writeln!(out, "{order}")?;

    heading(out, "5. PAYMENT")?;
    let expired = CreditCard::new("4532123456789012", "John Smith", 1, 2020, "123");
    order.set_payment_method(Box::new(expired));
    let result = order.process_payment()?;
    writeln!(
        out,
        "  Expired card approved: {} -> status {}",
        result.is_success(),
        order.status()
    )?;

    let card = CreditCard::new(
        "4532123456789012",
        "John Smith",
        12,
        Utc::now().year() + 2,
        "123",
    );
    writeln!(out, "  Retrying with card {}", card.masked_number())?;
    order.set_payment_method(Box::new(card));
    let result = order.process_payment()?;
    writeln!(
        out,
        "  Approved: {} (transaction {}) -> status {}",
        result.is_success(),
        result.transaction_id().unwrap_or("-"),
        order.status()
    )?;

    let paypal = PayPal::new("john@example.com", "paypalpass")?;
    if let Err(e) = paypal.refund("PP_00000000", &order.total()?) {
        writeln!(out, "  PayPal refund: {e} ({})", e.kind())?;
    }

    heading(out, "6. FULFILLMENT")?;
    order.ship()?;
    writeln!(out, "  Status: {}", order.status())?;
    if let Err(e) = order.cancel() {
        writeln!(out, "  Cancel rejected: {e} ({})", e.kind())?;
    }
    order.deliver()?;
    writeln!(out, "  Status: {}", order.status())?;

    Ok(())
}
