//! CLI command implementations.
//!
//! Each demo writes its narration to the writer it is given and logs
//! through `tracing`.

pub mod animals;
pub mod bank;
pub mod ecommerce;
pub mod files;
pub mod money;
pub mod ownership;
pub mod people;
pub mod shapes;
pub mod vehicles;

use std::io::Write;

/// Result type returned by every demo.
pub type DemoResult = Result<(), Box<dyn std::error::Error>>;

/// Write a section heading.
fn heading(out: &mut impl Write, title: &str) -> std::io::Result<()> {
    writeln!(out, "\n{title}")?;
    writeln!(out, "{}", "-".repeat(title.chars().count()))
}
