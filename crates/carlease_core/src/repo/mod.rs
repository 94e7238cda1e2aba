//! Repository contracts and the SQLite implementation behind them.
//!
//! # Responsibility
//! - Keep every SQL statement for vehicles/customers/leases/payments here.
//! - Run each operation as one scoped transaction.
//! - Return semantic errors (`*NotFound`, conflicts) next to store faults.
//!
//! # Invariants
//! - Write paths validate input before any SQL mutation.
//! - Read paths reject unmappable persisted rows instead of masking them.
//! - Dependent rows are removed explicitly; the schema declares no cascades.

pub mod customer_repo;
pub mod error;
pub mod lease_repo;
pub mod payment_repo;
mod schema;
mod tx;
pub mod vehicle_repo;

use customer_repo::CustomerRepository;
use lease_repo::LeaseRepository;
use payment_repo::PaymentRepository;
use rusqlite::Connection;
use vehicle_repo::VehicleRepository;

pub use error::{ErrorKind, RepoError, RepoResult};

/// Everything the lease gateway needs from storage.
pub trait CarLeaseRepository:
    VehicleRepository + CustomerRepository + LeaseRepository + PaymentRepository
{
}

impl<T> CarLeaseRepository for T where
    T: VehicleRepository + CustomerRepository + LeaseRepository + PaymentRepository
{
}

/// SQLite-backed repository borrowing a caller-owned connection.
pub struct SqliteCarLeaseRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCarLeaseRepository<'conn> {
    /// Wraps a migrated connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when the schema version is not the latest.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` for foreign schemas.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        schema::ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}
