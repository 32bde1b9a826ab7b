//! Postgres implementation of DeliveryRepository.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{Delivery, DeliveryStatus};
use crate::ports::{DeliveryRepository, RepositoryError, RepositoryResult};

#[derive(Clone)]
pub struct PostgresDeliveryRepository {
    pool: PgPool,
}

impl PostgresDeliveryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DeliveryRepository for PostgresDeliveryRepository {
    async fn insert(&self, delivery: &Delivery) -> RepositoryResult<Delivery> {
        let row = sqlx::query_as::<_, DeliveryRow>(
            r#"
            INSERT INTO deliveries (
                id, transaction_id, address, city, department, postal_code,
                delivery_status, delivery_notes, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
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
        .fetch_one(&self.pool)
        .await?;

        row.into_domain()
    }

    async fn find_by_transaction_id(
        &self,
        transaction_id: Uuid,
    ) -> RepositoryResult<Option<Delivery>> {
        let row = sqlx::query_as::<_, DeliveryRow>(
            "SELECT * FROM deliveries WHERE transaction_id = $1",
        )
        .bind(transaction_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(DeliveryRow::into_domain).transpose()
    }
}

#[derive(Debug, sqlx::FromRow)]
struct DeliveryRow {
    id: Uuid,
    transaction_id: Uuid,
    address: String,
    city: String,
    department: Option<String>,
    postal_code: Option<String>,
    delivery_status: String,
    delivery_notes: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl DeliveryRow {
    fn into_domain(self) -> RepositoryResult<Delivery> {
        let delivery_status = self
            .delivery_status
            .parse::<DeliveryStatus>()
            .map_err(RepositoryError::Corrupt)?;

        Ok(Delivery {
            id: self.id,
            transaction_id: self.transaction_id,
            address: self.address,
            city: self.city,
            department: self.department,
            postal_code: self.postal_code,
            delivery_status,
            delivery_notes: self.delivery_notes,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
