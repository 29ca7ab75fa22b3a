//! Plane shapes behind a common [`Shape`] interface.

use core::f64::consts::PI;
use core::fmt;

use crate::error::ErrorKind;

/// Errors raised when constructing a shape.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ShapeError {
    /// A length was zero, negative, NaN, or infinite.
    #[error("{dimension} must be a positive finite number (got {value})")]
    InvalidDimension { dimension: &'static str, value: f64 },

    #[error("invalid triangle: sides {0}, {1}, {2} don't satisfy the triangle inequality")]
    TriangleInequality(f64, f64, f64),
}

impl ShapeError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }
}

fn positive(dimension: &'static str, value: f64) -> Result<f64, ShapeError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ShapeError::InvalidDimension { dimension, value })
    }
}

/// Common shape interface.
pub trait Shape: fmt::Debug {
    fn name(&self) -> &'static str;

    fn area(&self) -> f64;

    fn perimeter(&self) -> f64;

    /// One-line description. Shapes usually override this with their
    /// dimensions.
    fn describe(&self) -> String {
        format!("This is a {}", self.name())
    }

    /// Name, area, and perimeter on separate lines.
    fn info(&self) -> String {
        format!(
            "Shape: {}\nArea: {:.2}\nPerimeter: {:.2}",
            self.name(),
            self.area(),
            self.perimeter()
        )
    }
}

/// Combined area of `shapes`.
#[must_use]
pub fn total_area(shapes: &[&dyn Shape]) -> f64 {
    shapes.iter().map(|shape| shape.area()).sum()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    width: f64,
    height: f64,
}

impl Rectangle {
    /// # Errors
    ///
    /// Returns `ShapeError::InvalidDimension` for a non-positive side.
    pub fn new(width: f64, height: f64) -> Result<Self, ShapeError> {
        Ok(Self {
            width: positive("width", width)?,
            height: positive("height", height)?,
        })
    }

    #[must_use]
    pub const fn width(&self) -> f64 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> f64 {
        self.height
    }
}

impl Shape for Rectangle {
    fn name(&self) -> &'static str {
        "Rectangle"
    }

    fn area(&self) -> f64 {
        self.width * self.height
    }

    fn perimeter(&self) -> f64 {
        2.0 * (self.width + self.height)
    }

    fn describe(&self) -> String {
        format!(
            "This is a Rectangle with width {} and height {}",
            self.width, self.height
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Square {
    side: f64,
}

impl Square {
    /// # Errors
    ///
    /// Returns `ShapeError::InvalidDimension` for a non-positive side.
    pub fn new(side: f64) -> Result<Self, ShapeError> {
        Ok(Self {
            side: positive("side", side)?,
        })
    }

    #[must_use]
    pub const fn side(&self) -> f64 {
        self.side
    }
}

impl Shape for Square {
    fn name(&self) -> &'static str {
        "Square"
    }

    fn area(&self) -> f64 {
        self.side * self.side
    }

    fn perimeter(&self) -> f64 {
        4.0 * self.side
    }

    fn describe(&self) -> String {
        format!("This is a Square with side {}", self.side)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    radius: f64,
}

impl Circle {
    /// # Errors
    ///
    /// Returns `ShapeError::InvalidDimension` for a non-positive radius.
    pub fn new(radius: f64) -> Result<Self, ShapeError> {
        Ok(Self {
            radius: positive("radius", radius)?,
        })
    }

    #[must_use]
    pub const fn radius(&self) -> f64 {
        self.radius
    }
}

impl Shape for Circle {
    fn name(&self) -> &'static str {
        "Circle"
    }

    fn area(&self) -> f64 {
        PI * self.radius * self.radius
    }

    fn perimeter(&self) -> f64 {
        2.0 * PI * self.radius
    }

    fn describe(&self) -> String {
        format!("This is a Circle with radius {}", self.radius)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    a: f64,
    b: f64,
    c: f64,
}

impl Triangle {
    /// # Errors
    ///
    /// Returns `ShapeError::InvalidDimension` for a non-positive side and
    /// `ShapeError::TriangleInequality` if the sides cannot close.
    pub fn new(a: f64, b: f64, c: f64) -> Result<Self, ShapeError> {
        let a = positive("side", a)?;
        let b = positive("side", b)?;
        let c = positive("side", c)?;
        if a + b <= c || a + c <= b || b + c <= a {
            return Err(ShapeError::TriangleInequality(a, b, c));
        }
        Ok(Self { a, b, c })
    }

    #[must_use]
    pub const fn sides(&self) -> (f64, f64, f64) {
        (self.a, self.b, self.c)
    }
}

impl Shape for Triangle {
    fn name(&self) -> &'static str {
        "Triangle"
    }

    /// Heron's formula.
    fn area(&self) -> f64 {
        let s = self.perimeter() / 2.0;
        (s * (s - self.a) * (s - self.b) * (s - self.c)).sqrt()
    }

    fn perimeter(&self) -> f64 {
        self.a + self.b + self.c
    }

    fn describe(&self) -> String {
        format!(
            "This is a Triangle with sides {}, {}, and {}",
            self.a, self.b, self.c
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_rectangle() {
        let r = Rectangle::new(5.0, 3.0).unwrap();
        assert!(close(r.area(), 15.0));
        assert!(close(r.perimeter(), 16.0));
        assert_eq!(r.describe(), "This is a Rectangle with width 5 and height 3");
    }

    #[test]
    fn test_circle() {
        let c = Circle::new(4.0).unwrap();
        assert!(close(c.area(), 16.0 * PI));
        assert_eq!(c.info(), "Shape: Circle\nArea: 50.27\nPerimeter: 25.13");
    }

    #[test]
    fn test_triangle_heron() {
        let t = Triangle::new(3.0, 4.0, 5.0).unwrap();
        assert!(close(t.area(), 6.0));
        assert!(close(t.perimeter(), 12.0));
    }

    #[test]
    fn test_triangle_inequality() {
        assert!(matches!(
            Triangle::new(1.0, 2.0, 3.0),
            Err(ShapeError::TriangleInequality(..))
        ));
        assert!(Triangle::new(1.0, 10.0, 2.0).is_err());
    }

    #[test]
    fn test_dimensions_validated() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = Circle::new(bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation);
        }
        assert!(Rectangle::new(2.0, 0.0).is_err());
        assert!(Square::new(-4.0).is_err());
    }

    #[test]
    fn test_total_area_dispatches_dynamically() {
        let rect = Rectangle::new(5.0, 3.0).unwrap();
        let square = Square::new(4.0).unwrap();
        let tri = Triangle::new(3.0, 4.0, 5.0).unwrap();
        let shapes: [&dyn Shape; 3] = [&rect, &square, &tri];
        assert!(close(total_area(&shapes), 15.0 + 16.0 + 6.0));
        assert!(close(total_area(&[]), 0.0));
    }

    #[test]
    fn test_default_describe() {
        #[derive(Debug)]
        struct Unit;
        impl Shape for Unit {
            fn name(&self) -> &'static str {
                "Unit"
            }
            fn area(&self) -> f64 {
                1.0
            }
            fn perimeter(&self) -> f64 {
                4.0
            }
        }
        assert_eq!(Unit.describe(), "This is a Unit");
    }
}
