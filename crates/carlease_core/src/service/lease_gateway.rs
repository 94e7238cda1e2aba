//! Car lease gateway: the request/response contract callers use.
//!
//! # Responsibility
//! - Expose add/remove/find/list for vehicles, customers, leases, payments.
//! - Turn repository `Option` reads into typed `*NotFound` errors.
//! - Report every outcome as a structured log event at this boundary.
//!
//! # Invariants
//! - Failures come back as `RepoError`; nothing panics past this layer.
//! - Log events carry ids and error codes only, never customer contact data.

use crate::model::customer::{Customer, CustomerId};
use crate::model::lease::{Lease, LeaseId, NewLease};
use crate::model::payment::{NewPayment, Payment, PaymentId};
use crate::model::vehicle::{NewVehicle, Vehicle, VehicleId, VehicleStatus};
use crate::repo::customer_repo::CustomerRemoval;
use crate::repo::error::{ErrorKind, RepoError, RepoResult};
use crate::repo::lease_repo::LeaseFilter;
use crate::repo::CarLeaseRepository;
use log::{debug, error, info, warn};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// Current wall-clock time as Unix epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_millis() as i64)
}

/// Gateway over one repository implementation.
pub struct CarLeaseService<R: CarLeaseRepository> {
    repo: R,
}

impl<R: CarLeaseRepository> CarLeaseService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn add_vehicle(&self, vehicle: &NewVehicle) -> RepoResult<VehicleId> {
        observe("vehicle_add", || self.repo.add_vehicle(vehicle))
            .inspect(|id| info!("event=vehicle_add module=gateway status=ok vehicle_id={id}"))
    }

    /// Deletes one vehicle; `VehicleNotFound` when nothing was deleted.
    pub fn remove_vehicle(&self, vehicle_id: VehicleId) -> RepoResult<()> {
        observe("vehicle_remove", || self.repo.remove_vehicle(vehicle_id)).inspect(|_| {
            info!("event=vehicle_remove module=gateway status=ok vehicle_id={vehicle_id}")
        })
    }

    pub fn list_available_vehicles(&self) -> RepoResult<Vec<Vehicle>> {
        observe("vehicle_list_available", || {
            self.repo.list_vehicles_by_status(VehicleStatus::Available)
        })
    }

    pub fn list_rented_vehicles(&self) -> RepoResult<Vec<Vehicle>> {
        observe("vehicle_list_rented", || {
            self.repo.list_vehicles_by_status(VehicleStatus::NotAvailable)
        })
    }

    pub fn find_vehicle_by_id(&self, vehicle_id: VehicleId) -> RepoResult<Vehicle> {
        observe("vehicle_find", || {
            self.repo
                .find_vehicle(vehicle_id)?
                .ok_or(RepoError::VehicleNotFound(vehicle_id))
        })
    }

    /// Inserts a customer under the id the caller chose.
    pub fn add_customer(&self, customer: &Customer) -> RepoResult<CustomerId> {
        observe("customer_add", || self.repo.add_customer(customer))
            .inspect(|id| info!("event=customer_add module=gateway status=ok customer_id={id}"))
    }

    /// Removes a customer together with its leases and their payments.
    ///
    /// All-or-nothing: a failure at any step leaves every row in place.
    pub fn remove_customer(&self, customer_id: CustomerId) -> RepoResult<CustomerRemoval> {
        observe("customer_remove", || self.repo.remove_customer(customer_id)).inspect(|removal| {
            info!(
                "event=customer_remove module=gateway status=ok customer_id={} leases_removed={} payments_removed={}",
                customer_id, removal.leases_removed, removal.payments_removed
            )
        })
    }

    pub fn list_customers(&self) -> RepoResult<Vec<Customer>> {
        observe("customer_list", || self.repo.list_customers())
    }

    pub fn find_customer_by_id(&self, customer_id: CustomerId) -> RepoResult<Customer> {
        observe("customer_find", || {
            self.repo
                .find_customer(customer_id)?
                .ok_or(RepoError::CustomerNotFound(customer_id))
        })
    }

    /// Opens a lease. Active leases take the vehicle out of availability.
    pub fn create_lease(&self, lease: &NewLease) -> RepoResult<LeaseId> {
        observe("lease_create", || self.repo.create_lease(lease)).inspect(|id| {
            info!(
                "event=lease_create module=gateway status=ok lease_id={} customer_id={} vehicle_id={} active={}",
                id,
                lease.customer_id,
                lease.vehicle_id,
                lease.is_active()
            )
        })
    }

    /// Closes an active lease now and releases its vehicle.
    ///
    /// # Errors
    /// - `LeaseNotFound` when no such lease exists.
    /// - `LeaseAlreadyReturned` when its end date is already set.
    /// - `LeaseNotStarted` when the lease starts in the future.
    pub fn return_lease(&self, lease_id: LeaseId) -> RepoResult<()> {
        observe("lease_return", || {
            self.repo.return_lease(lease_id, now_epoch_ms())
        })
        .inspect(|_| info!("event=lease_return module=gateway status=ok lease_id={lease_id}"))
    }

    pub fn find_lease_by_id(&self, lease_id: LeaseId) -> RepoResult<Lease> {
        observe("lease_find", || {
            self.repo
                .find_lease(lease_id)?
                .ok_or(RepoError::LeaseNotFound(lease_id))
        })
    }

    pub fn list_active_leases(&self) -> RepoResult<Vec<Lease>> {
        observe("lease_list_active", || self.repo.list_leases(LeaseFilter::Active))
    }

    pub fn list_lease_history(&self) -> RepoResult<Vec<Lease>> {
        observe("lease_list_history", || self.repo.list_leases(LeaseFilter::All))
    }

    pub fn record_payment(&self, payment: &NewPayment) -> RepoResult<PaymentId> {
        observe("payment_record", || self.repo.record_payment(payment)).inspect(|id| {
            info!(
                "event=payment_record module=gateway status=ok payment_id={} lease_id={}",
                id, payment.lease_id
            )
        })
    }

    pub fn list_payments_for_lease(&self, lease_id: LeaseId) -> RepoResult<Vec<Payment>> {
        observe("payment_list", || self.repo.list_payments_for_lease(lease_id))
    }
}

fn observe<T>(event: &'static str, op: impl FnOnce() -> RepoResult<T>) -> RepoResult<T> {
    let started_at = Instant::now();
    let result = op();
    let duration_ms = started_at.elapsed().as_millis();

    match &result {
        Ok(_) => debug!("event={event} module=gateway status=ok duration_ms={duration_ms}"),
        Err(err) if err.kind() == ErrorKind::StoreFault => error!(
            "event={} module=gateway status=error duration_ms={} error_code={} error={}",
            event,
            duration_ms,
            err.code(),
            err
        ),
        Err(err) => warn!(
            "event={} module=gateway status=error duration_ms={} error_code={} error={}",
            event,
            duration_ms,
            err.code(),
            err
        ),
    }

    result
}
