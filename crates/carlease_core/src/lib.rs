//! Data-access core for the car leasing application.
//! Vehicles, customers, leases and payments live in one SQLite store.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::StoreConfig;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::customer::{Customer, CustomerId};
pub use model::lease::{Lease, LeaseId, LeaseType, NewLease};
pub use model::payment::{NewPayment, Payment, PaymentId};
pub use model::validation::ValidationError;
pub use model::vehicle::{NewVehicle, Vehicle, VehicleId, VehicleStatus};
pub use repo::customer_repo::{CustomerRemoval, CustomerRepository};
pub use repo::lease_repo::{LeaseFilter, LeaseRepository};
pub use repo::payment_repo::PaymentRepository;
pub use repo::vehicle_repo::VehicleRepository;
pub use repo::{CarLeaseRepository, ErrorKind, RepoError, RepoResult, SqliteCarLeaseRepository};
pub use service::lease_gateway::{now_epoch_ms, CarLeaseService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
