//! User record model and input validation.
//!
//! # Responsibility
//! - Define the `(name, email, age)` record stored in `users`.
//! - Turn raw prompt text into validated records and age bounds.
//!
//! # Invariants
//! - A validated record has a non-empty `name` and an `email` containing `@`.
//! - Raw input is checked in order: age, email, name.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One row of the `users` table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserRecord {
    /// Display name. Also the lookup key for update/delete; not unique.
    pub name: String,
    /// Contact email. Unique across the table.
    pub email: String,
    pub age: i64,
}

/// Validation failure for user-provided record fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyName,
    MissingAt,
    /// Carries the rejected raw text.
    InvalidAge(String),
}

impl Display for UserValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name cannot be empty"),
            Self::MissingAt => write!(f, "email must contain a @"),
            Self::InvalidAge(raw) => write!(f, "age must be an integer, got `{raw}`"),
        }
    }
}

impl Error for UserValidationError {}

impl UserRecord {
    /// Builds a record without validating it.
    ///
    /// Used for trusted rows (seed data, rows read back from storage).
    pub fn new(name: impl Into<String>, email: impl Into<String>, age: i64) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            age,
        }
    }

    /// Builds a validated record from raw prompt input.
    ///
    /// # Errors
    /// - `InvalidAge` when `age` is not an integer (surrounding whitespace allowed).
    /// - `MissingAt` when `email` has no `@`.
    /// - `EmptyName` when `name` is empty.
    pub fn parse(name: &str, email: &str, age: &str) -> Result<Self, UserValidationError> {
        let age = parse_age(age)?;
        let record = Self::new(name, email, age);
        record.validate()?;
        Ok(record)
    }

    /// Checks field-level invariants required before persistence.
    pub fn validate(&self) -> Result<(), UserValidationError> {
        if !self.email.contains('@') {
            return Err(UserValidationError::MissingAt);
        }
        if self.name.is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        Ok(())
    }
}

/// Parses an optional age bound for filtering.
///
/// Blank input means "no bound" and yields `None`.
pub fn parse_age_bound(raw: &str) -> Result<Option<i64>, UserValidationError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    parse_age(raw).map(Some)
}

fn parse_age(raw: &str) -> Result<i64, UserValidationError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| UserValidationError::InvalidAge(raw.to_string()))
}
