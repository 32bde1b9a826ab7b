//! Persistence and gateway ports.
//!
//! Use cases depend on these traits only; Postgres adapters live in
//! `crate::adapters`, the Wompi client in `crate::wompi`.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{Customer, Delivery, Product, Transaction, TransactionStatus};

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("corrupt record: {0}")]
    Corrupt(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn insert(&self, product: &Product) -> RepositoryResult<Product>;

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Product>>;

    /// Products with stock remaining, newest first.
    async fn find_available(&self) -> RepositoryResult<Vec<Product>>;

    /// Conditionally decrements stock. Returns false when the product is
    /// missing or no longer holds `quantity` units; never drives stock
    /// negative.
    async fn decrement_stock(&self, id: Uuid, quantity: i32) -> RepositoryResult<bool>;
}

#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn insert(&self, customer: &Customer) -> RepositoryResult<Customer>;

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Customer>>;

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<Customer>>;
}

#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// Persists the transaction and its delivery record atomically.
    async fn insert_with_delivery(
        &self,
        transaction: &Transaction,
        delivery: &Delivery,
    ) -> RepositoryResult<Transaction>;

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Transaction>>;

    async fn find_by_gateway_id(&self, gateway_id: &str) -> RepositoryResult<Option<Transaction>>;

    async fn list(&self, limit: i64, offset: i64) -> RepositoryResult<Vec<Transaction>>;

    async fn update(&self, transaction: &Transaction) -> RepositoryResult<Transaction>;
}

#[async_trait]
pub trait DeliveryRepository: Send + Sync {
    async fn insert(&self, delivery: &Delivery) -> RepositoryResult<Delivery>;

    async fn find_by_transaction_id(
        &self,
        transaction_id: Uuid,
    ) -> RepositoryResult<Option<Delivery>>;
}

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("gateway rejected the request [{kind}]: {message}")]
    Api { kind: String, message: String },

    #[error("invalid response from gateway: {0}")]
    InvalidResponse(String),
}

/// Charge request sent to the payment gateway. Amounts are minor currency
/// units (centavos).
#[derive(Debug, Clone)]
pub struct PaymentRequest {
    pub amount_in_cents: i64,
    pub currency: String,
    pub customer_email: String,
    pub card_token: String,
    pub installments: u32,
    pub reference: String,
    pub acceptance_token: String,
    pub customer: GatewayCustomer,
}

#[derive(Debug, Clone)]
pub struct GatewayCustomer {
    pub full_name: String,
    pub phone_number: String,
}

/// The gateway's view of a transaction.
#[derive(Debug, Clone)]
pub struct GatewayTransaction {
    pub id: String,
    pub status: TransactionStatus,
    pub reference: String,
    pub amount_in_cents: i64,
    pub currency: String,
    pub payment_method_type: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct CardData {
    pub number: String,
    pub cvc: String,
    pub exp_month: String,
    pub exp_year: String,
    pub card_holder: String,
}

#[derive(Debug, Clone)]
pub struct CardToken {
    pub id: String,
    pub brand: String,
    pub last_four: String,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_transaction(
        &self,
        request: &PaymentRequest,
    ) -> Result<GatewayTransaction, GatewayError>;

    async fn get_transaction(&self, gateway_id: &str)
        -> Result<GatewayTransaction, GatewayError>;

    async fn tokenize_card(&self, card: &CardData) -> Result<CardToken, GatewayError>;

    /// Constant-time HMAC check of a webhook event body.
    fn verify_event_signature(&self, payload: &[u8], signature: &str) -> bool;
}
