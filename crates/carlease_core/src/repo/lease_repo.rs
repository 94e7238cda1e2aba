//! Lease persistence and the vehicle availability it drives.
//!
//! # Invariants
//! - A lease is only created against an existing customer and vehicle.
//! - Opening an active lease flips the vehicle to `notAvailable`; returning
//!   it flips the vehicle back, inside the same transaction.
//! - `return_lease` only closes leases whose `end_date` is still unset.
//! - The stored end date is exactly the return time; a lease cannot be
//!   returned before its start date.

use super::customer_repo::customer_exists;
use super::error::{RepoError, RepoResult};
use super::tx::{read_tx, write_tx};
use super::vehicle_repo::{set_vehicle_status, vehicle_status};
use super::SqliteCarLeaseRepository;
use crate::model::lease::{Lease, LeaseId, LeaseType, NewLease};
use crate::model::vehicle::VehicleStatus;
use rusqlite::{params, Connection, OptionalExtension, Row};

const LEASE_SELECT_SQL: &str = "SELECT
    lease_id,
    customer_id,
    vehicle_id,
    start_date,
    end_date,
    type
FROM leases";

/// Which leases a listing returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaseFilter {
    /// Only leases with no end date.
    Active,
    /// Every lease, active or returned.
    All,
}

pub trait LeaseRepository {
    /// Creates one lease and returns its store-assigned id.
    fn create_lease(&self, lease: &NewLease) -> RepoResult<LeaseId>;
    /// Closes an active lease at `returned_at` (epoch ms).
    ///
    /// `LeaseNotStarted` when `returned_at` precedes the lease start.
    fn return_lease(&self, lease_id: LeaseId, returned_at: i64) -> RepoResult<()>;
    fn find_lease(&self, lease_id: LeaseId) -> RepoResult<Option<Lease>>;
    /// Lists leases ordered by `lease_id ASC`.
    fn list_leases(&self, filter: LeaseFilter) -> RepoResult<Vec<Lease>>;
}

impl LeaseRepository for SqliteCarLeaseRepository<'_> {
    fn create_lease(&self, lease: &NewLease) -> RepoResult<LeaseId> {
        lease.validate()?;

        write_tx(self.conn, |tx| {
            if !customer_exists(tx, lease.customer_id)? {
                return Err(RepoError::CustomerNotFound(lease.customer_id));
            }
            let status = vehicle_status(tx, lease.vehicle_id)?
                .ok_or(RepoError::VehicleNotFound(lease.vehicle_id))?;
            if lease.is_active() && status == VehicleStatus::NotAvailable {
                return Err(RepoError::VehicleNotAvailable(lease.vehicle_id));
            }

            tx.execute(
                "INSERT INTO leases (
                    customer_id,
                    vehicle_id,
                    start_date,
                    end_date,
                    type
                ) VALUES (?1, ?2, ?3, ?4, ?5);",
                params![
                    lease.customer_id,
                    lease.vehicle_id,
                    lease.start_date,
                    lease.end_date,
                    lease.lease_type.as_db_str(),
                ],
            )?;
            let lease_id = tx.last_insert_rowid();

            if lease.is_active() {
                set_vehicle_status(tx, lease.vehicle_id, VehicleStatus::NotAvailable)?;
            }
            Ok(lease_id)
        })
    }

    fn return_lease(&self, lease_id: LeaseId, returned_at: i64) -> RepoResult<()> {
        write_tx(self.conn, |tx| {
            let Some(lease) = load_lease(tx, lease_id)? else {
                return Err(RepoError::LeaseNotFound(lease_id));
            };
            if !lease.is_active() {
                return Err(RepoError::LeaseAlreadyReturned(lease_id));
            }
            if returned_at < lease.start_date {
                return Err(RepoError::LeaseNotStarted {
                    lease_id,
                    start_date: lease.start_date,
                });
            }

            let changed = tx.execute(
                "UPDATE leases
                 SET end_date = ?2
                 WHERE lease_id = ?1
                   AND end_date IS NULL;",
                params![lease_id, returned_at],
            )?;
            if changed == 0 {
                return Err(RepoError::LeaseAlreadyReturned(lease_id));
            }

            set_vehicle_status(tx, lease.vehicle_id, VehicleStatus::Available)?;
            Ok(())
        })
    }

    fn find_lease(&self, lease_id: LeaseId) -> RepoResult<Option<Lease>> {
        read_tx(self.conn, |tx| load_lease(tx, lease_id))
    }

    fn list_leases(&self, filter: LeaseFilter) -> RepoResult<Vec<Lease>> {
        let sql = match filter {
            LeaseFilter::Active => {
                format!("{LEASE_SELECT_SQL} WHERE end_date IS NULL ORDER BY lease_id ASC;")
            }
            LeaseFilter::All => format!("{LEASE_SELECT_SQL} ORDER BY lease_id ASC;"),
        };

        read_tx(self.conn, |tx| {
            let mut stmt = tx.prepare(&sql)?;
            let mut rows = stmt.query([])?;
            let mut leases = Vec::new();
            while let Some(row) = rows.next()? {
                leases.push(parse_lease_row(row)?);
            }
            Ok(leases)
        })
    }
}

pub(crate) fn lease_exists(conn: &Connection, lease_id: LeaseId) -> RepoResult<bool> {
    let found: Option<i64> = conn
        .query_row(
            "SELECT lease_id FROM leases WHERE lease_id = ?1;",
            [lease_id],
            |row| row.get(0),
        )
        .optional()?;
    Ok(found.is_some())
}

fn load_lease(conn: &Connection, lease_id: LeaseId) -> RepoResult<Option<Lease>> {
    let mut stmt = conn.prepare(&format!("{LEASE_SELECT_SQL} WHERE lease_id = ?1;"))?;
    let mut rows = stmt.query([lease_id])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_lease_row(row)?));
    }
    Ok(None)
}

fn parse_lease_row(row: &Row<'_>) -> RepoResult<Lease> {
    let type_text: String = row.get("type")?;
    let lease_type = LeaseType::from_db_str(&type_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid lease type `{type_text}` in leases.type"))
    })?;

    Ok(Lease {
        lease_id: row.get("lease_id")?,
        customer_id: row.get("customer_id")?,
        vehicle_id: row.get("vehicle_id")?,
        start_date: row.get("start_date")?,
        end_date: row.get("end_date")?,
        lease_type,
    })
}
