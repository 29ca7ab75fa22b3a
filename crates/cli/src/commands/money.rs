//! Money arithmetic walkthrough.

use std::io::Write;

use bazaar_core::{Currency, Money};
use rust_decimal::Decimal;

use super::{DemoResult, heading};
use crate::config::CliConfig;

/// Show money arithmetic and the failures it guards against.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn run(out: &mut impl Write, config: &CliConfig) -> DemoResult {
    let currency = config.currency;
    let a = Money::from_cents(10_050, currency)?;
    let b = Money::from_cents(2_525, currency)?;

    heading(out, "1. ARITHMETIC")?;
    writeln!(out, "  a = {a}, b = {b}")?;
    writeln!(out, "  a + b = {}", (a + b)?)?;
    writeln!(out, "  a - b = {}", (a - b)?)?;
    writeln!(out, "  a * 3 = {}", (a * 3u32)?)?;
    writeln!(out, "  2 * b = {}", (Decimal::TWO * b)?)?;
    writeln!(out, "  a / 4 = {}", (a / Decimal::from(4))?)?;
    writeln!(out, "  a > b: {}", a > b)?;
    writeln!(out, "  zero is empty: {}", Money::zero(currency).is_zero())?;
    writeln!(out, "  sum: {}", Money::sum([&a, &b, &b], currency)?)?;

    heading(out, "2. GUARDS")?;
    let other = if currency == Currency::EUR {
        Currency::GBP
    } else {
        Currency::EUR
    };
    let foreign = Money::from_cents(1_000, other)?;
    let attempts = [
        ("negative amount", Money::new(Decimal::NEGATIVE_ONE, currency).map(|_| ())),
        ("b - a", (b - a).map(|_| ())),
        ("a + foreign", (a + foreign).map(|_| ())),
        ("a * -1", a.checked_mul(Decimal::NEGATIVE_ONE).map(|_| ())),
        ("a / 0", a.checked_div(Decimal::ZERO).map(|_| ())),
    ];
    for (label, outcome) in attempts {
        match outcome {
            Ok(()) => writeln!(out, "  {label}: ok")?,
            Err(e) => writeln!(out, "  {label}: {e}")?,
        }
    }
    writeln!(out, "  a vs foreign ordering: {:?}", a.partial_cmp(&foreign))?;

    Ok(())
}
