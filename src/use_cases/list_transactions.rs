use std::sync::Arc;

use crate::error::AppError;
use crate::ports::TransactionRepository;
use crate::use_cases::TransactionView;

pub struct ListTransactions {
    transactions: Arc<dyn TransactionRepository>,
}

impl ListTransactions {
    pub fn new(transactions: Arc<dyn TransactionRepository>) -> Self {
        Self { transactions }
    }

    pub async fn execute(&self, limit: i64, offset: i64) -> Result<Vec<TransactionView>, AppError> {
        let transactions = self.transactions.list(limit, offset).await?;
        Ok(transactions
            .iter()
            .map(TransactionView::from_transaction)
            .collect())
    }
}
