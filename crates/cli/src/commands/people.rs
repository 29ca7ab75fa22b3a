//! People walkthrough: validated fields, and a counter that keeps history.

use std::io::Write;

use bazaar_core::counter::Counter;
use bazaar_core::person::Person;

use super::{DemoResult, heading};

/// Run the people walkthrough.
///
/// # Errors
///
/// Returns an error if writing fails or a valid field is rejected.
pub fn run(out: &mut impl Write) -> DemoResult {
    heading(out, "1. VALIDATED PERSON")?;
    let mut person = Person::new("  alice   smith ", 25)?;
    writeln!(out, "  Name: {}", person.name())?;
    writeln!(out, "  Email (derived): {}", person.email())?;
    person.set_email("Alice.Smith@Work.COM")?;
    writeln!(out, "  Email (set): {}", person.email())?;
    writeln!(out, "  {}", person.description())?;

    if let Err(e) = person.set_age(200) {
        writeln!(out, "  Rejected age: {e}")?;
    }
    if let Err(e) = person.set_name("   ") {
        writeln!(out, "  Rejected name: {e}")?;
    }
    if let Err(e) = person.set_email("alice-at-work") {
        writeln!(out, "  Rejected email: {e}")?;
    }
    person.clear_email();
    writeln!(out, "  After clearing email: {}", person.email())?;

    heading(out, "2. COUNTER WITH HISTORY")?;
    let mut counter = Counter::new(10, 5);
    writeln!(out, "  Start: {counter}")?;
    counter.tick()?;
    counter.tick_by(3)?;
    counter.tick()?;
    writeln!(out, "  After three ticks: {counter}")?;
    counter.set_value(100);
    writeln!(out, "  History: {:?}", counter.history())?;
    writeln!(out, "  Changes: {}", counter.total_increments())?;
    counter.reset();
    writeln!(out, "  After reset: {counter}")?;

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_walkthrough() {
        let mut buf = Vec::new();
        run(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Name: Alice Smith"));
        assert!(text.contains("Email (derived): alice.smith@example.com"));
        assert!(text.contains("Email (set): alice.smith@work.com"));
        assert!(text.contains("Rejected age: age must be at most 150 (got 200)"));
        assert!(text.contains("Rejected name: name cannot be empty"));
        assert!(text.contains("Rejected email: email must contain an @ symbol"));
        assert!(text.contains("After three ticks: Counter(value=23, step=5)"));
        assert!(text.contains("History: [10, 15, 18, 23, 100]"));
        assert!(text.contains("Changes: 4"));
        assert!(text.contains("After reset: Counter(value=10, step=5)"));
    }
}
