//! Use-case services on top of the repositories.
//!
//! # Responsibility
//! - Provide the caller-facing car lease gateway.
//! - Keep callers decoupled from SQL and transaction details.

pub mod lease_gateway;
