//! Animals walkthrough: one daily routine, shaped by each animal.

use std::io::Write;

use bazaar_core::animal::{Animal, Bird, Dog};

use super::{DemoResult, heading};

/// Run the animals walkthrough.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn run(out: &mut impl Write) -> DemoResult {
    let mut dog = Dog::new("Buddy", "Golden Retriever", 3);
    let mut zoo: Vec<Box<dyn Animal>> = vec![
        Box::new(Dog::new("Rex", "German Shepherd", 5)),
        Box::new(Bird::new("Tweety", "Canary", 2, true)),
        Box::new(Bird::new("Pingu", "Penguin", 4, false)),
    ];

    heading(out, "1. THE SAME ROUTINE FOR EVERY ANIMAL")?;
    for animal in &mut zoo {
        writeln!(out, "{} ({}, {}):", animal.name(), animal.species(), animal.habitat())?;
        for line in animal.daily_routine().lines() {
            writeln!(out, "  {line}")?;
        }
    }

    heading(out, "2. HUNGER AND ENERGY")?;
    writeln!(out, "  {}", dog.get_hungry())?;
    writeln!(out, "  {}", dog.get_hungry())?;
    writeln!(out, "  {}", dog.eat("kibble"))?;
    writeln!(out, "  {}", dog.sleep())?;
    for line in dog.status().lines() {
        writeln!(out, "  {line}")?;
    }

    heading(out, "3. ABILITIES OF ONE KIND")?;
    writeln!(out, "  {} ({})", dog.fetch("ball"), dog.breed())?;
    let robin = Bird::new("Robin", "Robin", 1, true);
    writeln!(out, "  {}", robin.build_nest())?;

    tracing::debug!(animals = zoo.len() + 2, "Animals walkthrough finished");
    Ok(())
}
