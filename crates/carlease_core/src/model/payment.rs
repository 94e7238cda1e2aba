//! Payment record.

use super::lease::LeaseId;
use super::validation::{require_amount, ValidationError};
use serde::{Deserialize, Serialize};

pub type PaymentId = i64;

/// Insert request for a payment; the store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPayment {
    pub lease_id: LeaseId,
    /// Unix epoch milliseconds.
    pub payment_date: i64,
    pub amount: f64,
}

impl NewPayment {
    /// Amount must be finite and strictly positive.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_amount("amount", self.amount)?;
        if self.amount == 0.0 {
            return Err(ValidationError::NotPositive("amount"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    #[serde(rename = "paymentID")]
    pub payment_id: PaymentId,
    #[serde(rename = "leaseID")]
    pub lease_id: LeaseId,
    #[serde(rename = "paymentDate")]
    pub payment_date: i64,
    pub amount: f64,
}
