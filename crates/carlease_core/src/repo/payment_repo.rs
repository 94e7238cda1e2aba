//! Payment persistence.

use super::error::{RepoError, RepoResult};
use super::lease_repo::lease_exists;
use super::tx::{read_tx, write_tx};
use super::SqliteCarLeaseRepository;
use crate::model::lease::LeaseId;
use crate::model::payment::{NewPayment, Payment, PaymentId};
use rusqlite::{params, Row};

pub trait PaymentRepository {
    /// Records one payment against an existing lease.
    fn record_payment(&self, payment: &NewPayment) -> RepoResult<PaymentId>;
    /// Lists a lease's payments ordered by `payment_date ASC, payment_id ASC`.
    fn list_payments_for_lease(&self, lease_id: LeaseId) -> RepoResult<Vec<Payment>>;
}

impl PaymentRepository for SqliteCarLeaseRepository<'_> {
    fn record_payment(&self, payment: &NewPayment) -> RepoResult<PaymentId> {
        payment.validate()?;

        write_tx(self.conn, |tx| {
            if !lease_exists(tx, payment.lease_id)? {
                return Err(RepoError::LeaseNotFound(payment.lease_id));
            }
            tx.execute(
                "INSERT INTO payments (lease_id, payment_date, amount)
                 VALUES (?1, ?2, ?3);",
                params![payment.lease_id, payment.payment_date, payment.amount],
            )?;
            Ok(tx.last_insert_rowid())
        })
    }

    fn list_payments_for_lease(&self, lease_id: LeaseId) -> RepoResult<Vec<Payment>> {
        read_tx(self.conn, |tx| {
            if !lease_exists(tx, lease_id)? {
                return Err(RepoError::LeaseNotFound(lease_id));
            }
            let mut stmt = tx.prepare(
                "SELECT payment_id, lease_id, payment_date, amount
                 FROM payments
                 WHERE lease_id = ?1
                 ORDER BY payment_date ASC, payment_id ASC;",
            )?;
            let mut rows = stmt.query([lease_id])?;
            let mut payments = Vec::new();
            while let Some(row) = rows.next()? {
                payments.push(parse_payment_row(row)?);
            }
            Ok(payments)
        })
    }
}

fn parse_payment_row(row: &Row<'_>) -> RepoResult<Payment> {
    Ok(Payment {
        payment_id: row.get("payment_id")?,
        lease_id: row.get("lease_id")?,
        payment_date: row.get("payment_date")?,
        amount: row.get("amount")?,
    })
}
