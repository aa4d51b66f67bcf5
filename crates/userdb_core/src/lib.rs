//! Core persistence and query logic for the userdb record manager.
//! This crate owns the `users` table and every rule applied to its rows.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::user::{parse_age_bound, UserRecord, UserValidationError};
pub use repo::user_repo::{
    RepoError, RepoResult, SqliteUserRepository, UserFilter, UserRepository,
};
pub use service::user_service::UserService;
