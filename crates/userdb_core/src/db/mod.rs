//! SQLite storage bootstrap, schema reset and seed data.
//!
//! # Responsibility
//! - Open and configure the single SQLite connection used by the store.
//! - Recreate the `users` table and load the fixed seed rows.
//!
//! # Invariants
//! - Schema initialization is destructive: existing rows are dropped.
//! - Callers must initialize the schema before seeding or querying.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
pub mod schema;
pub mod seed;

pub use open::{open_db, open_db_in_memory};
pub use schema::initialize_schema;
pub use seed::{seed, SEED_USERS};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
