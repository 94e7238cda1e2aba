//! Lease record.
//!
//! # Invariants
//! - A lease is active while `end_date` is `None` and returned once it is set.
//! - `end_date >= start_date` whenever both are present.

use super::customer::CustomerId;
use super::validation::ValidationError;
use super::vehicle::VehicleId;
use serde::{Deserialize, Serialize};

pub type LeaseId = i64;

/// Billing cadence of a lease.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaseType {
    Daily,
    Monthly,
}

impl LeaseType {
    /// Text value stored in `leases.type`.
    pub fn as_db_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Monthly => "monthly",
        }
    }

    pub fn from_db_str(value: &str) -> Option<Self> {
        match value {
            "daily" => Some(Self::Daily),
            "monthly" => Some(Self::Monthly),
            _ => None,
        }
    }
}

/// Insert request for a lease; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLease {
    pub customer_id: CustomerId,
    pub vehicle_id: VehicleId,
    /// Unix epoch milliseconds.
    pub start_date: i64,
    /// `None` opens an active lease.
    pub end_date: Option<i64>,
    pub lease_type: LeaseType,
}

impl NewLease {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(end) = self.end_date {
            if end < self.start_date {
                return Err(ValidationError::EndBeforeStart {
                    start: self.start_date,
                    end,
                });
            }
        }
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.end_date.is_none()
    }
}

/// Persisted lease row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lease {
    #[serde(rename = "leaseID")]
    pub lease_id: LeaseId,
    #[serde(rename = "customerID")]
    pub customer_id: CustomerId,
    #[serde(rename = "vehicleID")]
    pub vehicle_id: VehicleId,
    #[serde(rename = "startDate")]
    pub start_date: i64,
    #[serde(rename = "endDate")]
    pub end_date: Option<i64>,
    #[serde(rename = "type")]
    pub lease_type: LeaseType,
}

impl Lease {
    /// Returns whether the vehicle is still out on this lease.
    pub fn is_active(&self) -> bool {
        self.end_date.is_none()
    }
}
