//! User repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD, substring search and prefix/age filtering over `users`.
//! - Translate SQLite constraint failures into semantic errors.
//!
//! # Invariants
//! - Write paths call `UserRecord::validate()` before SQL mutations.
//! - Update/delete by name touch every matching row.
//! - Listing order is whatever SQLite returns; no ORDER BY is applied.

use crate::db::DbError;
use crate::model::user::{UserRecord, UserValidationError};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const USER_SELECT_SQL: &str = "SELECT name, email, age FROM users";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for user persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(UserValidationError),
    Db(DbError),
    /// Another row already uses this email.
    DuplicateEmail(String),
    /// No row has this name.
    NotFound(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::DuplicateEmail(email) => write!(f, "user with email `{email}` already exists"),
            Self::NotFound(name) => write!(f, "user not found: {name}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::DuplicateEmail(_) => None,
            Self::NotFound(_) => None,
        }
    }
}

impl From<UserValidationError> for RepoError {
    fn from(value: UserValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Filter options for prefix + age range queries.
///
/// Age bounds are exclusive. `None` leaves that side unbounded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    /// Empty prefix matches every name.
    pub name_prefix: String,
    pub min_age: Option<i64>,
    pub max_age: Option<i64>,
}

/// Repository interface for user operations.
pub trait UserRepository {
    fn create_user(&self, user: &UserRecord) -> RepoResult<()>;
    /// Returns the first row with this exact name.
    fn find_by_name(&self, name: &str) -> RepoResult<Option<UserRecord>>;
    fn list_users(&self) -> RepoResult<Vec<UserRecord>>;
    /// Rows whose name or email contains `term`.
    fn search_users(&self, term: &str) -> RepoResult<Vec<UserRecord>>;
    fn filter_users(&self, filter: &UserFilter) -> RepoResult<Vec<UserRecord>>;
    /// Overwrites every row named `name`; returns the number of rows changed.
    fn update_users_by_name(&self, name: &str, user: &UserRecord) -> RepoResult<usize>;
    /// Removes every row named `name`; returns the number of rows removed.
    fn delete_users_by_name(&self, name: &str) -> RepoResult<usize>;
}

/// SQLite-backed user repository borrowing the process connection.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    /// Wraps a connection whose schema is already initialized.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn query_users(
        &self,
        sql: &str,
        bind: impl rusqlite::Params,
    ) -> RepoResult<Vec<UserRecord>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(bind)?;
        let mut users = Vec::new();

        while let Some(row) = rows.next()? {
            users.push(parse_user_row(row)?);
        }

        Ok(users)
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn create_user(&self, user: &UserRecord) -> RepoResult<()> {
        user.validate()?;

        self.conn
            .execute(
                "INSERT INTO users (name, email, age) VALUES (?1, ?2, ?3);",
                params![user.name.as_str(), user.email.as_str(), user.age],
            )
            .map_err(|err| map_write_error(err, &user.email))?;

        Ok(())
    }

    fn find_by_name(&self, name: &str) -> RepoResult<Option<UserRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{USER_SELECT_SQL} WHERE name = ?1;"))?;

        let mut rows = stmt.query([name])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_user_row(row)?));
        }

        Ok(None)
    }

    fn list_users(&self) -> RepoResult<Vec<UserRecord>> {
        self.query_users(&format!("{USER_SELECT_SQL};"), [])
    }

    fn search_users(&self, term: &str) -> RepoResult<Vec<UserRecord>> {
        let pattern = escape_like(term);
        self.query_users(
            &format!(
                "{USER_SELECT_SQL}
                 WHERE name LIKE '%' || ?1 || '%' ESCAPE '\\'
                    OR email LIKE '%' || ?1 || '%' ESCAPE '\\';"
            ),
            [pattern],
        )
    }

    fn filter_users(&self, filter: &UserFilter) -> RepoResult<Vec<UserRecord>> {
        let prefix = escape_like(&filter.name_prefix);
        self.query_users(
            &format!(
                "{USER_SELECT_SQL}
                 WHERE name LIKE ?1 || '%' ESCAPE '\\'
                   AND (?2 IS NULL OR age > ?2)
                   AND (?3 IS NULL OR age < ?3);"
            ),
            params![prefix, filter.min_age, filter.max_age],
        )
    }

    fn update_users_by_name(&self, name: &str, user: &UserRecord) -> RepoResult<usize> {
        user.validate()?;

        let changed = self
            .conn
            .execute(
                "UPDATE users
                 SET
                    name = ?1,
                    email = ?2,
                    age = ?3
                 WHERE name = ?4;",
                params![user.name.as_str(), user.email.as_str(), user.age, name],
            )
            .map_err(|err| map_write_error(err, &user.email))?;

        Ok(changed)
    }

    fn delete_users_by_name(&self, name: &str) -> RepoResult<usize> {
        let removed = self
            .conn
            .execute("DELETE FROM users WHERE name = ?1;", [name])?;
        Ok(removed)
    }
}

fn parse_user_row(row: &Row<'_>) -> RepoResult<UserRecord> {
    Ok(UserRecord {
        name: row.get("name")?,
        email: row.get("email")?,
        age: row.get("age")?,
    })
}

fn map_write_error(err: rusqlite::Error, email: &str) -> RepoError {
    if is_unique_violation(&err) {
        return RepoError::DuplicateEmail(email.to_string());
    }
    err.into()
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(inner, _)
            if inner.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

/// Escapes `LIKE` wildcards so `value` matches literally under `ESCAPE '\'`.
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
