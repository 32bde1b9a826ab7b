//! Get transaction use case.
//!
//! Reads refresh the stored status from the gateway while the transaction
//! is still PENDING and a gateway id exists; terminal statuses are served
//! straight from the database. A failed refresh falls back to the stored
//! status.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::TransactionStatus;
use crate::error::AppError;
use crate::ports::{DeliveryRepository, PaymentGateway, TransactionRepository};
use crate::use_cases::{DeliverySummary, TransactionView};

pub struct GetTransaction {
    transactions: Arc<dyn TransactionRepository>,
    deliveries: Arc<dyn DeliveryRepository>,
    gateway: Arc<dyn PaymentGateway>,
}

impl GetTransaction {
    pub fn new(
        transactions: Arc<dyn TransactionRepository>,
        deliveries: Arc<dyn DeliveryRepository>,
        gateway: Arc<dyn PaymentGateway>,
    ) -> Self {
        Self {
            transactions,
            deliveries,
            gateway,
        }
    }

    pub async fn execute(&self, id: Uuid) -> Result<TransactionView, AppError> {
        let mut transaction = self
            .transactions
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Transaction"))?;

        if transaction.can_be_processed() {
            if let Some(gateway_id) = transaction.gateway_transaction_id.clone() {
                match self.gateway.get_transaction(&gateway_id).await {
                    Ok(remote) if remote.status != TransactionStatus::Pending => {
                        tracing::info!(
                            %gateway_id,
                            status = %remote.status,
                            "gateway status changed, updating local record"
                        );
                        transaction.apply_gateway_status(remote.status, None);
                        transaction = self.transactions.update(&transaction).await?;
                    }
                    Ok(_) => {}
                    Err(err) => {
                        // Best effort: serve the stored status.
                        tracing::warn!(%gateway_id, error = %err, "gateway status refresh failed");
                    }
                }
            }
        }

        let mut view = TransactionView::from_transaction(&transaction);
        if let Some(delivery) = self
            .deliveries
            .find_by_transaction_id(transaction.id)
            .await?
        {
            view.delivery = Some(DeliverySummary::from(&delivery));
        }

        Ok(view)
    }
}
