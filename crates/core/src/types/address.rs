//! Postal address value object.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A shipping or billing address.
///
/// Immutable once built; equality compares every field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address {
    street: String,
    city: String,
    state: String,
    zip_code: String,
    country: String,
}

impl Address {
    /// Country used when none is given.
    pub const DEFAULT_COUNTRY: &'static str = "USA";

    /// Create an address in the default country.
    #[must_use]
    pub fn new(
        street: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        zip_code: impl Into<String>,
    ) -> Self {
        Self {
            street: street.into(),
            city: city.into(),
            state: state.into(),
            zip_code: zip_code.into(),
            country: Self::DEFAULT_COUNTRY.to_owned(),
        }
    }

    /// Return a copy with a different country.
    #[must_use]
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    #[must_use]
    pub fn street(&self) -> &str {
        &self.street
    }

    #[must_use]
    pub fn city(&self) -> &str {
        &self.city
    }

    #[must_use]
    pub fn state(&self) -> &str {
        &self.state
    }

    #[must_use]
    pub fn zip_code(&self) -> &str {
        &self.zip_code
    }

    #[must_use]
    pub fn country(&self) -> &str {
        &self.country
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {} {}, {}",
            self.street, self.city, self.state, self.zip_code, self.country
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_address() {
        let address = Address::new("123 Main St", "Anytown", "CA", "12345");
        assert_eq!(address.to_string(), "123 Main St, Anytown, CA 12345, USA");
    }

    #[test]
    fn test_value_equality() {
        let a = Address::new("123 Main St", "Anytown", "CA", "12345");
        let b = Address::new("123 Main St", "Anytown", "CA", "12345");
        assert_eq!(a, b);
        assert_ne!(a, b.clone().with_country("Canada"));
        assert_ne!(a, Address::new("124 Main St", "Anytown", "CA", "12345"));
    }
}
