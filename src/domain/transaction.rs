//! Checkout transaction entity.
//!
//! A transaction is created in PENDING state and moves to exactly one of
//! APPROVED, DECLINED or ERROR once the gateway has answered. Terminal
//! states never transition again.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionStatus {
    Pending,
    Approved,
    Declined,
    Error,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "PENDING",
            TransactionStatus::Approved => "APPROVED",
            TransactionStatus::Declined => "DECLINED",
            TransactionStatus::Error => "ERROR",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(TransactionStatus::Pending),
            "APPROVED" => Ok(TransactionStatus::Approved),
            "DECLINED" => Ok(TransactionStatus::Declined),
            "ERROR" => Ok(TransactionStatus::Error),
            other => Err(format!("unknown transaction status: {}", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Transaction {
    pub id: Uuid,
    pub transaction_number: String,
    pub customer_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub product_amount: i64,
    pub base_fee: i64,
    pub delivery_fee: i64,
    pub total_amount: i64,
    pub status: TransactionStatus,
    pub gateway_transaction_id: Option<String>,
    pub gateway_reference: Option<String>,
    pub payment_method: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    pub fn new(
        transaction_number: String,
        customer_id: Uuid,
        product_id: Uuid,
        quantity: i32,
        product_amount: i64,
        base_fee: i64,
        delivery_fee: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            transaction_number,
            customer_id,
            product_id,
            quantity,
            product_amount,
            base_fee,
            delivery_fee,
            total_amount: product_amount + base_fee + delivery_fee,
            status: TransactionStatus::Pending,
            gateway_transaction_id: None,
            gateway_reference: None,
            payment_method: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Only PENDING transactions can be sent to the gateway.
    pub fn can_be_processed(&self) -> bool {
        self.status == TransactionStatus::Pending
    }

    pub fn apply_gateway_status(
        &mut self,
        status: TransactionStatus,
        gateway_transaction_id: Option<String>,
    ) {
        self.status = status;
        if let Some(id) = gateway_transaction_id {
            self.gateway_transaction_id = Some(id);
        }
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transaction() -> Transaction {
        Transaction::new(
            "TXN-1700000000000-ab12cd34".to_string(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            1,
            4_500_000,
            2_000,
            5_000,
        )
    }

    #[test]
    fn test_new_transaction_totals() {
        let tx = transaction();
        assert_eq!(tx.total_amount, 4_507_000);
        assert_eq!(tx.status, TransactionStatus::Pending);
        assert!(tx.gateway_transaction_id.is_none());
    }

    #[test]
    fn test_can_be_processed_only_when_pending() {
        let mut tx = transaction();
        assert!(tx.can_be_processed());

        tx.apply_gateway_status(TransactionStatus::Approved, Some("wompi-1".to_string()));
        assert!(!tx.can_be_processed());
        assert_eq!(tx.gateway_transaction_id.as_deref(), Some("wompi-1"));
    }

    #[test]
    fn test_apply_gateway_status_keeps_existing_gateway_id() {
        let mut tx = transaction();
        tx.apply_gateway_status(TransactionStatus::Pending, Some("wompi-1".to_string()));
        tx.apply_gateway_status(TransactionStatus::Declined, None);

        assert_eq!(tx.status, TransactionStatus::Declined);
        assert_eq!(tx.gateway_transaction_id.as_deref(), Some("wompi-1"));
    }

    #[test]
    fn test_status_round_trips_through_strings() {
        for status in [
            TransactionStatus::Pending,
            TransactionStatus::Approved,
            TransactionStatus::Declined,
            TransactionStatus::Error,
        ] {
            assert_eq!(status.as_str().parse::<TransactionStatus>(), Ok(status));
        }
        assert!("COMPLETED".parse::<TransactionStatus>().is_err());
    }
}
