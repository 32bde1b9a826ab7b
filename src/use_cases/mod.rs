//! One use case per user action. Each holds its ports behind `Arc<dyn …>`
//! and returns `Result<view, AppError>`; failures are values, never panics.

pub mod create_customer;
pub mod create_transaction;
pub mod get_customer;
pub mod get_product;
pub mod get_products;
pub mod get_transaction;
pub mod list_transactions;
pub mod process_payment;

pub use create_customer::CreateCustomer;
pub use create_transaction::CreateTransaction;
pub use get_customer::GetCustomer;
pub use get_product::GetProduct;
pub use get_products::GetProducts;
pub use get_transaction::GetTransaction;
pub use list_transactions::ListTransactions;
pub use process_payment::ProcessPayment;

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{Customer, Delivery, DeliveryStatus, Product, Transaction, TransactionStatus};

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerView {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&Customer> for CustomerView {
    fn from(customer: &Customer) -> Self {
        Self {
            id: customer.id,
            name: customer.name.clone(),
            email: customer.email.clone(),
            phone: customer.phone.clone(),
            created_at: customer.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub stock: i32,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            stock: product.stock,
            image_url: product.image_url.clone(),
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AmountBreakdown {
    pub product_amount: i64,
    pub base_fee: i64,
    pub delivery_fee: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub id: Uuid,
    pub name: String,
    pub price: i64,
}

impl From<&Product> for ProductSummary {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl From<&Customer> for CustomerSummary {
    fn from(customer: &Customer) -> Self {
        Self {
            id: customer.id,
            name: customer.name.clone(),
            email: customer.email.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeliverySummary {
    pub id: Uuid,
    pub address: String,
    pub city: String,
    pub delivery_status: DeliveryStatus,
}

impl From<&Delivery> for DeliverySummary {
    fn from(delivery: &Delivery) -> Self {
        Self {
            id: delivery.id,
            address: delivery.address.clone(),
            city: delivery.city.clone(),
            delivery_status: delivery.delivery_status,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionView {
    pub id: Uuid,
    pub transaction_number: String,
    pub status: TransactionStatus,
    pub total_amount: i64,
    pub breakdown: AmountBreakdown,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<ProductSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<CustomerSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery: Option<DeliverySummary>,
    pub created_at: DateTime<Utc>,
}

impl TransactionView {
    pub fn from_transaction(transaction: &Transaction) -> Self {
        Self {
            id: transaction.id,
            transaction_number: transaction.transaction_number.clone(),
            status: transaction.status,
            total_amount: transaction.total_amount,
            breakdown: AmountBreakdown {
                product_amount: transaction.product_amount,
                base_fee: transaction.base_fee,
                delivery_fee: transaction.delivery_fee,
            },
            payment_method: transaction.payment_method.clone(),
            product: None,
            customer: None,
            delivery: None,
            created_at: transaction.created_at,
        }
    }
}
