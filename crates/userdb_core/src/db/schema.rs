//! Destructive `users` table initialization.
//!
//! # Invariants
//! - Drop and create run in one transaction; a failure leaves the previous
//!   table untouched.
//! - Running it twice yields an empty table of the same shape.

use super::DbResult;
use log::warn;
use rusqlite::Connection;

const USERS_SCHEMA_SQL: &str = include_str!("schema.sql");

/// Drops any existing `users` table and recreates it empty.
///
/// All rows written by a previous run are lost.
pub fn initialize_schema(conn: &mut Connection) -> DbResult<()> {
    let tx = conn.transaction()?;
    tx.execute_batch(USERS_SCHEMA_SQL)?;
    tx.commit()?;

    warn!("event=schema_reset module=db status=ok table=users");
    Ok(())
}
