//! Customer persistence, including the cascading customer removal.
//!
//! # Invariants
//! - Customer ids are caller-assigned; inserting an existing id is a conflict.
//! - `remove_customer` deletes payments, then leases, then the customer, in
//!   one transaction. Either all three deletes land or none do.
//! - Vehicles held by the customer's active leases are released on removal.

use super::error::{RepoError, RepoResult};
use super::tx::{read_tx, write_tx};
use super::SqliteCarLeaseRepository;
use crate::model::customer::{Customer, CustomerId};
use crate::model::vehicle::VehicleStatus;
use rusqlite::{params, Connection, Row};

const CUSTOMER_SELECT_SQL: &str = "SELECT
    customer_id,
    first_name,
    last_name,
    email,
    phone_number
FROM customers";

/// Row counts removed alongside one customer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CustomerRemoval {
    pub payments_removed: usize,
    pub leases_removed: usize,
}

pub trait CustomerRepository {
    /// Inserts one customer under the caller-supplied id.
    fn add_customer(&self, customer: &Customer) -> RepoResult<CustomerId>;
    /// Removes one customer with all dependent leases and payments.
    fn remove_customer(&self, customer_id: CustomerId) -> RepoResult<CustomerRemoval>;
    fn list_customers(&self) -> RepoResult<Vec<Customer>>;
    fn find_customer(&self, customer_id: CustomerId) -> RepoResult<Option<Customer>>;
}

impl CustomerRepository for SqliteCarLeaseRepository<'_> {
    fn add_customer(&self, customer: &Customer) -> RepoResult<CustomerId> {
        customer.validate()?;

        write_tx(self.conn, |tx| {
            if customer_exists(tx, customer.customer_id)? {
                return Err(RepoError::DuplicateCustomer(customer.customer_id));
            }
            tx.execute(
                "INSERT INTO customers (
                    customer_id,
                    first_name,
                    last_name,
                    email,
                    phone_number
                ) VALUES (?1, ?2, ?3, ?4, ?5);",
                params![
                    customer.customer_id,
                    customer.first_name.trim(),
                    customer.last_name.trim(),
                    customer.email.trim(),
                    customer.phone_number.trim(),
                ],
            )?;
            Ok(customer.customer_id)
        })
    }

    fn remove_customer(&self, customer_id: CustomerId) -> RepoResult<CustomerRemoval> {
        write_tx(self.conn, |tx| {
            let payments_removed = tx.execute(
                "DELETE FROM payments
                 WHERE lease_id IN (
                    SELECT lease_id FROM leases WHERE customer_id = ?1
                 );",
                [customer_id],
            )?;
            tx.execute(
                "UPDATE vehicles
                 SET status = ?2
                 WHERE vehicle_id IN (
                    SELECT vehicle_id
                    FROM leases
                    WHERE customer_id = ?1
                      AND end_date IS NULL
                 );",
                params![customer_id, VehicleStatus::Available.as_db_str()],
            )?;
            let leases_removed =
                tx.execute("DELETE FROM leases WHERE customer_id = ?1;", [customer_id])?;
            let customers_removed = tx.execute(
                "DELETE FROM customers WHERE customer_id = ?1;",
                [customer_id],
            )?;
            if customers_removed == 0 {
                return Err(RepoError::CustomerNotFound(customer_id));
            }

            Ok(CustomerRemoval {
                payments_removed,
                leases_removed,
            })
        })
    }

    fn list_customers(&self) -> RepoResult<Vec<Customer>> {
        read_tx(self.conn, |tx| {
            let mut stmt = tx.prepare(&format!("{CUSTOMER_SELECT_SQL} ORDER BY customer_id ASC;"))?;
            let mut rows = stmt.query([])?;
            let mut customers = Vec::new();
            while let Some(row) = rows.next()? {
                customers.push(parse_customer_row(row)?);
            }
            Ok(customers)
        })
    }

    fn find_customer(&self, customer_id: CustomerId) -> RepoResult<Option<Customer>> {
        read_tx(self.conn, |tx| {
            let mut stmt = tx.prepare(&format!("{CUSTOMER_SELECT_SQL} WHERE customer_id = ?1;"))?;
            let mut rows = stmt.query([customer_id])?;
            if let Some(row) = rows.next()? {
                return Ok(Some(parse_customer_row(row)?));
            }
            Ok(None)
        })
    }
}

pub(crate) fn customer_exists(conn: &Connection, customer_id: CustomerId) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM customers WHERE customer_id = ?1);",
        [customer_id],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn parse_customer_row(row: &Row<'_>) -> RepoResult<Customer> {
    Ok(Customer {
        customer_id: row.get("customer_id")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        email: row.get("email")?,
        phone_number: row.get("phone_number")?,
    })
}
