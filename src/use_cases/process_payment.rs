//! Payment processing use case.
//!
//! Sends a PENDING transaction to the gateway and reconciles the local
//! record with the answer. Stock is decremented only on APPROVED, via the
//! conditional update in the product repository.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::TransactionStatus;
use crate::error::AppError;
use crate::ports::{
    GatewayCustomer, PaymentGateway, PaymentRequest, ProductRepository, TransactionRepository,
};
use crate::use_cases::TransactionView;

#[derive(Debug, Clone)]
pub struct PaymentInput {
    pub card_token: String,
    pub customer_email: String,
    pub acceptance_token: String,
}

pub struct ProcessPayment {
    transactions: Arc<dyn TransactionRepository>,
    products: Arc<dyn ProductRepository>,
    gateway: Arc<dyn PaymentGateway>,
    customer_data: GatewayCustomer,
}

impl ProcessPayment {
    pub fn new(
        transactions: Arc<dyn TransactionRepository>,
        products: Arc<dyn ProductRepository>,
        gateway: Arc<dyn PaymentGateway>,
        customer_data: GatewayCustomer,
    ) -> Self {
        Self {
            transactions,
            products,
            gateway,
            customer_data,
        }
    }

    pub async fn execute(
        &self,
        transaction_id: Uuid,
        input: PaymentInput,
    ) -> Result<TransactionView, AppError> {
        tracing::info!(%transaction_id, "processing payment");

        let mut transaction = self
            .transactions
            .find_by_id(transaction_id)
            .await?
            .ok_or_else(|| AppError::not_found("Transaction"))?;

        if !transaction.can_be_processed() {
            return Err(AppError::InvalidState(transaction.status));
        }

        // Stock may have moved since the transaction was created.
        let product = self
            .products
            .find_by_id(transaction.product_id)
            .await?
            .ok_or_else(|| AppError::not_found("Product"))?;

        if !product.has_stock(transaction.quantity) {
            return Err(AppError::InsufficientStock {
                available: product.stock,
                requested: transaction.quantity,
            });
        }

        // The gateway refuses reused references, so each attempt gets a
        // fresh one derived from the transaction number.
        let reference = format!(
            "{}-{}",
            transaction.transaction_number,
            Utc::now().timestamp_millis()
        );

        let request = PaymentRequest {
            amount_in_cents: transaction.total_amount * 100,
            currency: "COP".to_string(),
            customer_email: input.customer_email,
            card_token: input.card_token,
            installments: 1,
            reference: reference.clone(),
            acceptance_token: input.acceptance_token,
            customer: self.customer_data.clone(),
        };

        let gateway_tx = self.gateway.create_transaction(&request).await?;

        tracing::info!(
            gateway_id = %gateway_tx.id,
            status = %gateway_tx.status,
            "gateway answered"
        );

        transaction.apply_gateway_status(gateway_tx.status, Some(gateway_tx.id));
        transaction.gateway_reference = Some(reference);
        transaction.payment_method = gateway_tx.payment_method_type;

        let updated = self.transactions.update(&transaction).await?;

        if updated.status == TransactionStatus::Approved {
            let decremented = self
                .products
                .decrement_stock(product.id, updated.quantity)
                .await?;
            if decremented {
                tracing::info!(
                    product_id = %product.id,
                    quantity = updated.quantity,
                    "stock decremented after approved payment"
                );
            } else {
                // Payment already captured; nothing to compensate with here.
                tracing::error!(
                    product_id = %product.id,
                    quantity = updated.quantity,
                    "stock decrement failed after approved payment"
                );
            }
        }

        Ok(TransactionView::from_transaction(&updated))
    }
}
