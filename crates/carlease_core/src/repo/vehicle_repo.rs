//! Vehicle persistence.
//!
//! # Invariants
//! - `remove_vehicle` reports `VehicleNotFound` when no row was deleted.
//! - Listing is ordered by `vehicle_id ASC`.

use super::error::{RepoError, RepoResult};
use super::tx::{read_tx, write_tx};
use super::SqliteCarLeaseRepository;
use crate::model::vehicle::{NewVehicle, Vehicle, VehicleId, VehicleStatus};
use rusqlite::{params, Connection, OptionalExtension, Row};

const VEHICLE_SELECT_SQL: &str = "SELECT
    vehicle_id,
    make,
    model,
    year,
    daily_rate,
    status,
    passenger_capacity,
    engine_capacity
FROM vehicles";

pub trait VehicleRepository {
    /// Inserts one vehicle and returns its store-assigned id.
    fn add_vehicle(&self, vehicle: &NewVehicle) -> RepoResult<VehicleId>;
    /// Deletes one vehicle by id.
    fn remove_vehicle(&self, vehicle_id: VehicleId) -> RepoResult<()>;
    /// Lists vehicles having exactly `status`.
    fn list_vehicles_by_status(&self, status: VehicleStatus) -> RepoResult<Vec<Vehicle>>;
    fn find_vehicle(&self, vehicle_id: VehicleId) -> RepoResult<Option<Vehicle>>;
}

impl VehicleRepository for SqliteCarLeaseRepository<'_> {
    fn add_vehicle(&self, vehicle: &NewVehicle) -> RepoResult<VehicleId> {
        vehicle.validate()?;

        write_tx(self.conn, |tx| {
            tx.execute(
                "INSERT INTO vehicles (
                    make,
                    model,
                    year,
                    daily_rate,
                    status,
                    passenger_capacity,
                    engine_capacity
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
                params![
                    vehicle.make.trim(),
                    vehicle.model.trim(),
                    vehicle.year,
                    vehicle.daily_rate,
                    vehicle.status.as_db_str(),
                    vehicle.passenger_capacity,
                    vehicle.engine_capacity,
                ],
            )?;
            Ok(tx.last_insert_rowid())
        })
    }

    fn remove_vehicle(&self, vehicle_id: VehicleId) -> RepoResult<()> {
        write_tx(self.conn, |tx| {
            let changed = tx.execute(
                "DELETE FROM vehicles WHERE vehicle_id = ?1;",
                [vehicle_id],
            )?;
            if changed == 0 {
                return Err(RepoError::VehicleNotFound(vehicle_id));
            }
            Ok(())
        })
    }

    fn list_vehicles_by_status(&self, status: VehicleStatus) -> RepoResult<Vec<Vehicle>> {
        read_tx(self.conn, |tx| {
            let mut stmt = tx.prepare(&format!(
                "{VEHICLE_SELECT_SQL}
                 WHERE status = ?1
                 ORDER BY vehicle_id ASC;"
            ))?;
            let mut rows = stmt.query([status.as_db_str()])?;
            let mut vehicles = Vec::new();
            while let Some(row) = rows.next()? {
                vehicles.push(parse_vehicle_row(row)?);
            }
            Ok(vehicles)
        })
    }

    fn find_vehicle(&self, vehicle_id: VehicleId) -> RepoResult<Option<Vehicle>> {
        read_tx(self.conn, |tx| load_vehicle(tx, vehicle_id))
    }
}

pub(crate) fn load_vehicle(conn: &Connection, vehicle_id: VehicleId) -> RepoResult<Option<Vehicle>> {
    let mut stmt = conn.prepare(&format!("{VEHICLE_SELECT_SQL} WHERE vehicle_id = ?1;"))?;
    let mut rows = stmt.query([vehicle_id])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_vehicle_row(row)?));
    }
    Ok(None)
}

pub(crate) fn vehicle_status(
    conn: &Connection,
    vehicle_id: VehicleId,
) -> RepoResult<Option<VehicleStatus>> {
    let value: Option<String> = conn
        .query_row(
            "SELECT status FROM vehicles WHERE vehicle_id = ?1;",
            [vehicle_id],
            |row| row.get(0),
        )
        .optional()?;
    value.map(|text| parse_status(&text)).transpose()
}

pub(crate) fn set_vehicle_status(
    conn: &Connection,
    vehicle_id: VehicleId,
    status: VehicleStatus,
) -> RepoResult<()> {
    let changed = conn.execute(
        "UPDATE vehicles SET status = ?2 WHERE vehicle_id = ?1;",
        params![vehicle_id, status.as_db_str()],
    )?;
    if changed == 0 {
        return Err(RepoError::VehicleNotFound(vehicle_id));
    }
    Ok(())
}

fn parse_vehicle_row(row: &Row<'_>) -> RepoResult<Vehicle> {
    let status_text: String = row.get("status")?;
    Ok(Vehicle {
        vehicle_id: row.get("vehicle_id")?,
        make: row.get("make")?,
        model: row.get("model")?,
        year: row.get("year")?,
        daily_rate: row.get("daily_rate")?,
        status: parse_status(&status_text)?,
        passenger_capacity: row.get("passenger_capacity")?,
        engine_capacity: row.get("engine_capacity")?,
    })
}

fn parse_status(value: &str) -> RepoResult<VehicleStatus> {
    VehicleStatus::from_db_str(value).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid vehicle status `{value}` in vehicles.status"))
    })
}
