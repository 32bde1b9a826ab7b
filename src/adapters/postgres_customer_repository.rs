//! Postgres implementation of CustomerRepository.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::Customer;
use crate::ports::{CustomerRepository, RepositoryResult};

#[derive(Clone)]
pub struct PostgresCustomerRepository {
    pool: PgPool,
}

impl PostgresCustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerRepository for PostgresCustomerRepository {
    async fn insert(&self, customer: &Customer) -> RepositoryResult<Customer> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r#"
            INSERT INTO customers (id, name, email, phone, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(customer.id)
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(&customer.phone)
        .bind(customer.created_at)
        .bind(customer.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_domain())
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Customer>> {
        let row = sqlx::query_as::<_, CustomerRow>("SELECT * FROM customers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(CustomerRow::into_domain))
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<Customer>> {
        let row = sqlx::query_as::<_, CustomerRow>("SELECT * FROM customers WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(CustomerRow::into_domain))
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    id: Uuid,
    name: String,
    email: String,
    phone: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl CustomerRow {
    fn into_domain(self) -> Customer {
        Customer {
            id: self.id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
