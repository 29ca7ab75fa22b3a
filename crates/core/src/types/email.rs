//! Email address type.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ErrorKind;

/// Errors that can occur when parsing an [`Email`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    /// The input string is empty.
    #[error("email cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("email must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input does not contain an @ symbol.
    #[error("email must contain an @ symbol")]
    MissingAtSymbol,
    /// The local part (before @) is empty.
    #[error("email local part cannot be empty")]
    EmptyLocalPart,
    /// The domain part (after @) is empty.
    #[error("email domain cannot be empty")]
    EmptyDomain,
    /// The domain has no `.` between labels.
    #[error("email domain must contain a dot")]
    DomainMissingDot,
}

impl EmailError {
    /// Every email error is a validation failure.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }
}

/// A syntactically plausible email address.
///
/// ## Constraints
///
/// - Length: 1-254 characters (RFC 5321 limit)
/// - Contains an @ symbol with a non-empty local part before it
/// - The domain after the @ is non-empty and contains a `.`
///
/// ## Examples
///
/// ```
/// use bazaar_core::Email;
///
/// assert!(Email::parse("john@example.com").is_ok());
/// assert!(Email::parse("jane.doe+shop@mail.example.co.uk").is_ok());
///
/// assert!(Email::parse("").is_err());
/// assert!(Email::parse("john.example.com").is_err()); // missing @
/// assert!(Email::parse("@example.com").is_err());     // empty local part
/// assert!(Email::parse("john@").is_err());            // empty domain
/// assert!(Email::parse("john@localhost").is_err());   // no dot in domain
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Maximum length of an email address (RFC 5321).
    pub const MAX_LENGTH: usize = 254;

    /// Parse an `Email` from a string.
    ///
    /// # Errors
    ///
    /// Returns an [`EmailError`] describing the first rule the input breaks.
    pub fn parse(s: &str) -> Result<Self, EmailError> {
        if s.is_empty() {
            return Err(EmailError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        let (local, rest) = s.split_once('@').ok_or(EmailError::MissingAtSymbol)?;
        if local.is_empty() {
            return Err(EmailError::EmptyLocalPart);
        }

        // Only the segment up to a second @ counts as the domain.
        let domain = rest.split('@').next().unwrap_or_default();
        if domain.is_empty() {
            return Err(EmailError::EmptyDomain);
        }
        if !domain.contains('.') {
            return Err(EmailError::DomainMissingDot);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the email address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the local part of the email (before the @).
    #[must_use]
    pub fn local_part(&self) -> &str {
        self.0.split('@').next().unwrap_or_default()
    }

    /// Returns the domain part of the email (after the @).
    #[must_use]
    pub fn domain(&self) -> &str {
        self.0.split('@').nth(1).unwrap_or_default()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_common_shapes() {
        for input in [
            "john@example.com",
            "john.smith@example.com",
            "john+cart@example.com",
            "john@shop.example.com",
            "a@b.c",
        ] {
            assert!(Email::parse(input).is_ok(), "{input} should parse");
        }
    }

    #[test]
    fn test_rejects_with_specific_reason() {
        let cases = [
            ("", EmailError::Empty),
            ("john.example.com", EmailError::MissingAtSymbol),
            ("@example.com", EmailError::EmptyLocalPart),
            ("john@", EmailError::EmptyDomain),
            ("john@localhost", EmailError::DomainMissingDot),
            ("john@nodot@example.com", EmailError::DomainMissingDot),
        ];
        for (input, expected) in cases {
            assert_eq!(Email::parse(input).unwrap_err(), expected, "{input}");
        }
    }

    #[test]
    fn test_rejects_too_long() {
        let long = format!("{}@example.com", "j".repeat(250));
        assert!(matches!(
            Email::parse(&long),
            Err(EmailError::TooLong { max: 254 })
        ));
    }

    #[test]
    fn test_parts() {
        let email: Email = "john@example.com".parse().unwrap();
        assert_eq!(email.local_part(), "john");
        assert_eq!(email.domain(), "example.com");
        assert_eq!(email.to_string(), "john@example.com");
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let email = Email::parse("john@example.com").unwrap();
        assert_eq!(
            serde_json::to_string(&email).unwrap(),
            "\"john@example.com\""
        );
    }
}
