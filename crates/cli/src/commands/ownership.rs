//! Ownership walkthrough: a house owns its rooms, a university only
//! refers to its students.

use std::io::Write;

use bazaar_core::house::House;
use bazaar_core::university::{Student, University};

use super::{DemoResult, heading};

/// Run the ownership walkthrough.
///
/// # Errors
///
/// Returns an error if writing fails or a first enrollment is rejected.
pub fn run(out: &mut impl Write) -> DemoResult {
    heading(out, "1. COMPOSITION: HOUSE AND ROOMS")?;
    let house = House::new("123 Oak Street");
    writeln!(out, "  {}:", house.address())?;
    for room in house.list_rooms() {
        writeln!(out, "    {room}")?;
    }
    writeln!(out, "  Total area: {} sq ft", house.total_area())?;
    drop(house);
    writeln!(out, "  The rooms went with the house.")?;

    heading(out, "2. AGGREGATION: UNIVERSITY AND STUDENTS")?;
    let mut alice = Student::new("Alice", 20);
    let mut bob = Student::new("Bob", 22);
    {
        let mut mit = University::new("MIT");
        mit.enroll(&mut alice)?;
        mit.enroll(&mut bob)?;
        writeln!(out, "  {alice}")?;
        writeln!(out, "  {bob}")?;
        writeln!(out, "  {} has {} students", mit.name(), mit.enrolled().len())?;

        let mut stanford = University::new("Stanford");
        if let Err(e) = stanford.enroll(&mut alice) {
            writeln!(out, "  {e}")?;
        }

        mit.graduate(&mut alice);
        mit.graduate(&mut bob);
    }
    writeln!(out, "  After graduating and closing the university:")?;
    writeln!(out, "  {alice}")?;
    writeln!(out, "  {bob}")?;

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
        assert!(text.contains("    Living Room: 300 sq ft"));
        assert!(text.contains("Total area: 700 sq ft"));
        assert!(text.contains("  Student: Alice at MIT"));
        assert!(text.contains("MIT has 2 students"));
        assert!(text.contains("Alice is already enrolled at MIT"));
        assert!(text.ends_with("  Student: Alice\n  Student: Bob\n"));
    }
}
