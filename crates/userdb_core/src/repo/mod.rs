//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository writes must enforce `UserRecord::validate()` before persistence.
//! - Unique violations surface as `RepoError::DuplicateEmail`, not raw DB errors.

pub mod user_repo;
