//! Shapes walkthrough: one interface, many implementations, plus vector
//! arithmetic through the standard operators.

use std::io::Write;

use bazaar_core::shape::{Circle, Rectangle, Shape, Square, Triangle, total_area};
use bazaar_core::vector::Vector;

use super::{DemoResult, heading};

/// Run the shapes walkthrough.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn run(out: &mut impl Write) -> DemoResult {
    let rectangle = Rectangle::new(5.0, 3.0)?;
    let circle = Circle::new(4.0)?;
    let triangle = Triangle::new(3.0, 4.0, 5.0)?;
    let square = Square::new(4.0)?;
    let shapes: [&dyn Shape; 4] = [&rectangle, &circle, &triangle, &square];

    heading(out, "1. SAME CALL, DIFFERENT SHAPES")?;
    for shape in shapes {
        writeln!(out, "{}", shape.describe())?;
        for line in shape.info().lines() {
            writeln!(out, "  {line}")?;
        }
    }
    writeln!(out, "Total area: {:.2}", total_area(&shapes))?;

    heading(out, "2. INVALID SHAPES")?;
    if let Err(e) = Triangle::new(1.0, 2.0, 10.0) {
        writeln!(out, "  {e}")?;
    }
    if let Err(e) = Circle::new(-1.0) {
        writeln!(out, "  {e}")?;
    }

    heading(out, "3. VECTOR OPERATORS")?;
    let v1 = Vector::new(3.0, 4.0);
    let v2 = Vector::new(1.0, 2.0);
    writeln!(out, "  v1 = {v1}, v2 = {v2}")?;
    writeln!(out, "  v1 + v2 = {}", v1 + v2)?;
    writeln!(out, "  v1 - v2 = {}", v1 - v2)?;
    writeln!(out, "  v1 * 2 = {}", v1 * 2.0)?;
    writeln!(out, "  3 * v2 = {}", 3.0 * v2)?;
    writeln!(out, "  -v1 = {}", -v1)?;
    writeln!(out, "  |v1| = {}", v1.magnitude())?;
    writeln!(out, "  v1 . v2 = {}", v1.dot(v2))?;
    writeln!(out, "  v1 == v2: {}", v1 == v2)?;

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
        assert!(text.contains("This is a Triangle with sides 3, 4, and 5"));
        assert!(text.contains("  Area: 50.27"));
        assert!(text.contains("Total area: 87.27"));
        assert!(text.contains("don't satisfy the triangle inequality"));
        assert!(text.contains("radius must be a positive finite number (got -1)"));
        assert!(text.contains("v1 + v2 = Vector(4, 6)"));
        assert!(text.contains("3 * v2 = Vector(3, 6)"));
        assert!(text.contains("-v1 = Vector(-3, -4)"));
        assert!(text.contains("|v1| = 5"));
        assert!(text.contains("v1 . v2 = 11"));
    }
}
