//! Domain model for user records.
//!
//! # Responsibility
//! - Define the record shape shared by repository, service and CLI.
//! - Own input validation for user-provided fields.
//!
//! # Invariants
//! - Records are keyed by `name`; there is no surrogate identifier.
//! - Write paths only accept records that passed `UserRecord::validate()`.

pub mod user;
