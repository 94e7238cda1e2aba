//! Scoped transactions around one unit of repository work.
//!
//! Work commits only when the closure returns `Ok`; on `Err` the transaction
//! is dropped and SQLite rolls it back.

use super::error::RepoResult;
use rusqlite::{Connection, Transaction, TransactionBehavior};

/// Runs `work` in an IMMEDIATE transaction so the write lock is taken up front.
pub(crate) fn write_tx<T>(
    conn: &Connection,
    work: impl FnOnce(&Transaction<'_>) -> RepoResult<T>,
) -> RepoResult<T> {
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;
    let value = work(&tx)?;
    tx.commit()?;
    Ok(value)
}

/// Runs `work` in a DEFERRED transaction; reads see one consistent snapshot.
pub(crate) fn read_tx<T>(
    conn: &Connection,
    work: impl FnOnce(&Transaction<'_>) -> RepoResult<T>,
) -> RepoResult<T> {
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Deferred)?;
    let value = work(&tx)?;
    tx.commit()?;
    Ok(value)
}
