//! Domain records for the car lease store.
//!
//! # Responsibility
//! - Define the vehicle/customer/lease/payment shapes exchanged with callers.
//! - Validate write inputs before they reach SQL.
//!
//! # Invariants
//! - Timestamps are Unix epoch milliseconds.
//! - A lease is active exactly when `end_date` is `None`.

pub mod customer;
pub mod lease;
pub mod payment;
pub mod validation;
pub mod vehicle;
