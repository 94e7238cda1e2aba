//! Vehicle record.
//!
//! # Invariants
//! - `vehicle_id` is assigned by the store on insert.
//! - `status` flips to `NotAvailable` while an active lease holds the vehicle.

use super::validation::{require_amount, require_text, ValidationError};
use serde::{Deserialize, Serialize};

pub type VehicleId = i64;

/// Rental availability of a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VehicleStatus {
    #[serde(rename = "available")]
    Available,
    #[serde(rename = "notAvailable")]
    NotAvailable,
}

impl VehicleStatus {
    /// Text value stored in `vehicles.status`.
    pub fn as_db_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::NotAvailable => "notAvailable",
        }
    }

    pub fn from_db_str(value: &str) -> Option<Self> {
        match value {
            "available" => Some(Self::Available),
            "notAvailable" => Some(Self::NotAvailable),
            _ => None,
        }
    }
}

/// Insert request for a vehicle; the store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewVehicle {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub daily_rate: f64,
    pub status: VehicleStatus,
    pub passenger_capacity: u32,
    /// Litres.
    pub engine_capacity: f64,
}

impl NewVehicle {
    /// Checks the request before it is written.
    ///
    /// # Errors
    /// - Blank `make`/`model`.
    /// - Non-finite or negative `daily_rate`/`engine_capacity`.
    /// - Zero `passenger_capacity`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("make", &self.make)?;
        require_text("model", &self.model)?;
        require_amount("dailyRate", self.daily_rate)?;
        require_amount("engineCapacity", self.engine_capacity)?;
        if self.passenger_capacity == 0 {
            return Err(ValidationError::NotPositive("passengerCapacity"));
        }
        Ok(())
    }
}

/// Persisted vehicle row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    #[serde(rename = "vehicleID")]
    pub vehicle_id: VehicleId,
    pub make: String,
    pub model: String,
    pub year: i32,
    #[serde(rename = "dailyRate")]
    pub daily_rate: f64,
    pub status: VehicleStatus,
    #[serde(rename = "passengerCapacity")]
    pub passenger_capacity: u32,
    #[serde(rename = "engineCapacity")]
    pub engine_capacity: f64,
}

impl Vehicle {
    pub fn is_available(&self) -> bool {
        self.status == VehicleStatus::Available
    }
}
