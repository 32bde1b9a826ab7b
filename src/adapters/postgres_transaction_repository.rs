//! Postgres implementation of TransactionRepository.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{Delivery, Transaction, TransactionStatus};
use crate::ports::{RepositoryError, RepositoryResult, TransactionRepository};

#[derive(Clone)]
pub struct PostgresTransactionRepository {
    pool: PgPool,
}

impl PostgresTransactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransactionRepository for PostgresTransactionRepository {
    async fn insert_with_delivery(
        &self,
        transaction: &Transaction,
        delivery: &Delivery,
    ) -> RepositoryResult<Transaction> {
        // Single transaction boundary: either both records land or neither.
        let mut db_tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, TransactionRow>(
            r#"
            INSERT INTO transactions (
                id, transaction_number, customer_id, product_id, quantity,
                product_amount, base_fee, delivery_fee, total_amount, status,
                gateway_transaction_id, gateway_reference, payment_method,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING *
            "#,
        )
        .bind(transaction.id)
        .bind(&transaction.transaction_number)
        .bind(transaction.customer_id)
        .bind(transaction.product_id)
        .bind(transaction.quantity)
        .bind(transaction.product_amount)
        .bind(transaction.base_fee)
        .bind(transaction.delivery_fee)
        .bind(transaction.total_amount)
        .bind(transaction.status.as_str())
        .bind(&transaction.gateway_transaction_id)
        .bind(&transaction.gateway_reference)
        .bind(&transaction.payment_method)
        .bind(transaction.created_at)
        .bind(transaction.updated_at)
        .fetch_one(&mut *db_tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO deliveries (
                id, transaction_id, address, city, department, postal_code,
                delivery_status, delivery_notes, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(delivery.id)
        .bind(delivery.transaction_id)
        .bind(&delivery.address)
        .bind(&delivery.city)
        .bind(&delivery.department)
        .bind(&delivery.postal_code)
        .bind(delivery.delivery_status.as_str())
        .bind(&delivery.delivery_notes)
        .bind(delivery.created_at)
        .bind(delivery.updated_at)
        .execute(&mut *db_tx)
        .await?;

        db_tx.commit().await?;
        row.into_domain()
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Transaction>> {
        let row = sqlx::query_as::<_, TransactionRow>("SELECT * FROM transactions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(TransactionRow::into_domain).transpose()
    }

    async fn find_by_gateway_id(
        &self,
        gateway_id: &str,
    ) -> RepositoryResult<Option<Transaction>> {
        let row = sqlx::query_as::<_, TransactionRow>(
            "SELECT * FROM transactions WHERE gateway_transaction_id = $1",
        )
        .bind(gateway_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(TransactionRow::into_domain).transpose()
    }

    async fn list(&self, limit: i64, offset: i64) -> RepositoryResult<Vec<Transaction>> {
        let rows = sqlx::query_as::<_, TransactionRow>(
            "SELECT * FROM transactions ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TransactionRow::into_domain).collect()
    }

    async fn update(&self, transaction: &Transaction) -> RepositoryResult<Transaction> {
        let row = sqlx::query_as::<_, TransactionRow>(
            r#"
            UPDATE transactions
            SET status = $2,
                gateway_transaction_id = $3,
                gateway_reference = $4,
                payment_method = $5,
                updated_at = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(transaction.id)
        .bind(transaction.status.as_str())
        .bind(&transaction.gateway_transaction_id)
        .bind(&transaction.gateway_reference)
        .bind(&transaction.payment_method)
        .bind(transaction.updated_at)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| RepositoryError::NotFound(format!("Transaction {}", transaction.id)))?
            .into_domain()
    }
}

/// Internal row type for SQLx. Not exposed outside the adapter.
#[derive(Debug, sqlx::FromRow)]
struct TransactionRow {
    id: Uuid,
    transaction_number: String,
    customer_id: Uuid,
    product_id: Uuid,
    quantity: i32,
    product_amount: i64,
    base_fee: i64,
    delivery_fee: i64,
    total_amount: i64,
    status: String,
    gateway_transaction_id: Option<String>,
    gateway_reference: Option<String>,
    payment_method: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl TransactionRow {
    fn into_domain(self) -> RepositoryResult<Transaction> {
        let status = self
            .status
            .parse::<TransactionStatus>()
            .map_err(RepositoryError::Corrupt)?;

        Ok(Transaction {
            id: self.id,
            transaction_number: self.transaction_number,
            customer_id: self.customer_id,
            product_id: self.product_id,
            quantity: self.quantity,
            product_amount: self.product_amount,
            base_fee: self.base_fee,
            delivery_fee: self.delivery_fee,
            total_amount: self.total_amount,
            status,
            gateway_transaction_id: self.gateway_transaction_id,
            gateway_reference: self.gateway_reference,
            payment_method: self.payment_method,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
