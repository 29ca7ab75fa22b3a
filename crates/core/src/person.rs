//! A person whose fields are validated on every write.

use core::fmt;

use serde::Serialize;

use crate::error::ErrorKind;
use crate::types::{Email, EmailError};

/// Errors that can occur when setting a [`Person`] field.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PersonError {
    #[error("name cannot be empty")]
    EmptyName,

    #[error("age must be at most {max} (got {0})", max = Person::MAX_AGE)]
    UnrealisticAge(u32),

    #[error(transparent)]
    Email(#[from] EmailError),
}

impl PersonError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }
}

/// A named adult or minor with an optional email.
///
/// Names are trimmed and title-cased. Emails are stored lowercased; without
/// one, [`email`](Self::email) derives an address from the name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Person {
    name: String,
    age: u32,
    email: Option<Email>,
}

impl Person {
    pub const MAX_AGE: u32 = 150;
    pub const ADULT_AGE: u32 = 18;

    /// # Errors
    ///
    /// Returns [`PersonError`] if the name is blank or the age is above
    /// [`MAX_AGE`](Self::MAX_AGE).
    pub fn new(name: &str, age: u32) -> Result<Self, PersonError> {
        Ok(Self {
            name: normalize_name(name)?,
            age: check_age(age)?,
            email: None,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// # Errors
    ///
    /// Returns [`PersonError::EmptyName`] if `name` is blank.
    pub fn set_name(&mut self, name: &str) -> Result<(), PersonError> {
        self.name = normalize_name(name)?;
        Ok(())
    }

    #[must_use]
    pub const fn age(&self) -> u32 {
        self.age
    }

    /// # Errors
    ///
    /// Returns [`PersonError::UnrealisticAge`] above [`MAX_AGE`](Self::MAX_AGE).
    pub fn set_age(&mut self, age: u32) -> Result<(), PersonError> {
        self.age = check_age(age)?;
        Ok(())
    }

    /// The stored email, or one derived from the name.
    #[must_use]
    pub fn email(&self) -> String {
        self.email.as_ref().map_or_else(
            || format!("{}@example.com", self.name.to_lowercase().replace(' ', ".")),
            |email| email.as_str().to_owned(),
        )
    }

    #[must_use]
    pub const fn has_email(&self) -> bool {
        self.email.is_some()
    }

    /// # Errors
    ///
    /// Returns [`PersonError::Email`] if the address does not parse.
    pub fn set_email(&mut self, email: &str) -> Result<(), PersonError> {
        self.email = Some(Email::parse(&email.trim().to_lowercase())?);
        Ok(())
    }

    pub fn clear_email(&mut self) {
        self.email = None;
    }

    #[must_use]
    pub const fn is_adult(&self) -> bool {
        self.age >= Self::ADULT_AGE
    }

    #[must_use]
    pub fn description(&self) -> String {
        let stage = if self.is_adult() { "adult" } else { "minor" };
        format!(
            "{} is a {}-year-old {stage} with email {}",
            self.name,
            self.age,
            self.email()
        )
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.age)
    }
}

fn normalize_name(name: &str) -> Result<String, PersonError> {
    let words: Vec<String> = name.split_whitespace().map(title_case).collect();
    if words.is_empty() {
        return Err(PersonError::EmptyName);
    }
    Ok(words.join(" "))
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
    })
}

const fn check_age(age: u32) -> Result<u32, PersonError> {
    if age > Person::MAX_AGE {
        return Err(PersonError::UnrealisticAge(age));
    }
    Ok(age)
}
