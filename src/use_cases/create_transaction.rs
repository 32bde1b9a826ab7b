//! Create transaction use case.
//!
//! Persists a PENDING transaction plus its delivery record. Stock is
//! checked but not reserved; only an approved payment mutates it.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::{Delivery, Transaction};
use crate::error::AppError;
use crate::ports::{CustomerRepository, ProductRepository, TransactionRepository};
use crate::use_cases::{CustomerSummary, DeliverySummary, ProductSummary, TransactionView};

/// Fixed fee charged once per transaction, in COP.
pub const BASE_FEE: i64 = 2_000;
/// Shipping fee charged per unit, in COP.
pub const DELIVERY_FEE_PER_UNIT: i64 = 5_000;

#[derive(Debug, Clone)]
pub struct DeliveryInfo {
    pub address: String,
    pub city: String,
    pub department: Option<String>,
    pub postal_code: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    pub customer_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub delivery: DeliveryInfo,
}

pub struct CreateTransaction {
    transactions: Arc<dyn TransactionRepository>,
    products: Arc<dyn ProductRepository>,
    customers: Arc<dyn CustomerRepository>,
}

impl CreateTransaction {
    pub fn new(
        transactions: Arc<dyn TransactionRepository>,
        products: Arc<dyn ProductRepository>,
        customers: Arc<dyn CustomerRepository>,
    ) -> Self {
        Self {
            transactions,
            products,
            customers,
        }
    }

    pub async fn execute(
        &self,
        input: CreateTransactionInput,
    ) -> Result<TransactionView, AppError> {
        let product = self
            .products
            .find_by_id(input.product_id)
            .await?
            .ok_or_else(|| AppError::not_found("Product"))?;

        if !product.has_stock(input.quantity) {
            return Err(AppError::InsufficientStock {
                available: product.stock,
                requested: input.quantity,
            });
        }

        let customer = self
            .customers
            .find_by_id(input.customer_id)
            .await?
            .ok_or_else(|| AppError::not_found("Customer"))?;

        let product_amount = product.price * i64::from(input.quantity);
        let delivery_fee = DELIVERY_FEE_PER_UNIT * i64::from(input.quantity);

        let transaction = Transaction::new(
            generate_transaction_number(),
            customer.id,
            product.id,
            input.quantity,
            product_amount,
            BASE_FEE,
            delivery_fee,
        );

        let delivery = Delivery::new(
            transaction.id,
            input.delivery.address,
            input.delivery.city,
            input.delivery.department,
            input.delivery.postal_code,
        );

        let saved = self
            .transactions
            .insert_with_delivery(&transaction, &delivery)
            .await?;

        tracing::info!(
            transaction_number = %saved.transaction_number,
            total_amount = saved.total_amount,
            "transaction created"
        );

        let mut view = TransactionView::from_transaction(&saved);
        view.product = Some(ProductSummary::from(&product));
        view.customer = Some(CustomerSummary::from(&customer));
        view.delivery = Some(DeliverySummary::from(&delivery));
        Ok(view)
    }
}

/// Time-based prefix plus a random suffix; the millisecond timestamp keeps
/// numbers roughly sortable, the uuid fragment prevents collisions between
/// concurrent creations.
fn generate_transaction_number() -> String {
    let millis = Utc::now().timestamp_millis();
    let suffix = Uuid::new_v4().simple().to_string();
    format!("TXN-{}-{}", millis, &suffix[..8])
}
