//! In-memory implementations of the repository ports.
//!
//! `Arc<RwLock<HashMap>>` backed, safe for concurrent use. These drive the
//! use-case and router tests; no persistence.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::{Customer, Delivery, Product, Transaction};
use crate::ports::{
    CustomerRepository, DeliveryRepository, ProductRepository, RepositoryError, RepositoryResult,
    TransactionRepository,
};

#[derive(Default, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<Uuid, Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn insert(&self, product: &Product) -> RepositoryResult<Product> {
        let mut products = self.products.write().await;
        products.insert(product.id, product.clone());
        Ok(product.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(&id).cloned())
    }

    async fn find_available(&self) -> RepositoryResult<Vec<Product>> {
        let products = self.products.read().await;
        let mut available: Vec<Product> =
            products.values().filter(|p| p.stock > 0).cloned().collect();
        available.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(available)
    }

    async fn decrement_stock(&self, id: Uuid, quantity: i32) -> RepositoryResult<bool> {
        let mut products = self.products.write().await;
        match products.get_mut(&id) {
            Some(product) if product.stock >= quantity => {
                product.stock -= quantity;
                product.updated_at = chrono::Utc::now();
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[derive(Default, Clone)]
pub struct InMemoryCustomerRepository {
    customers: Arc<RwLock<HashMap<Uuid, Customer>>>,
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn insert(&self, customer: &Customer) -> RepositoryResult<Customer> {
        let mut customers = self.customers.write().await;
        customers.insert(customer.id, customer.clone());
        Ok(customer.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Customer>> {
        let customers = self.customers.read().await;
        Ok(customers.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<Customer>> {
        let customers = self.customers.read().await;
        Ok(customers.values().find(|c| c.email == email).cloned())
    }
}

#[derive(Default, Clone)]
pub struct InMemoryDeliveryRepository {
    deliveries: Arc<RwLock<HashMap<Uuid, Delivery>>>,
}

impl InMemoryDeliveryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DeliveryRepository for InMemoryDeliveryRepository {
    async fn insert(&self, delivery: &Delivery) -> RepositoryResult<Delivery> {
        let mut deliveries = self.deliveries.write().await;
        deliveries.insert(delivery.id, delivery.clone());
        Ok(delivery.clone())
    }

    async fn find_by_transaction_id(
        &self,
        transaction_id: Uuid,
    ) -> RepositoryResult<Option<Delivery>> {
        let deliveries = self.deliveries.read().await;
        Ok(deliveries
            .values()
            .find(|d| d.transaction_id == transaction_id)
            .cloned())
    }
}

/// Writes the delivery through a shared [`InMemoryDeliveryRepository`] so the
/// atomic insert contract has an in-memory equivalent.
#[derive(Default, Clone)]
pub struct InMemoryTransactionRepository {
    transactions: Arc<RwLock<HashMap<Uuid, Transaction>>>,
    deliveries: InMemoryDeliveryRepository,
}

impl InMemoryTransactionRepository {
    pub fn new(deliveries: InMemoryDeliveryRepository) -> Self {
        Self {
            transactions: Arc::default(),
            deliveries,
        }
    }
}

#[async_trait]
impl TransactionRepository for InMemoryTransactionRepository {
    async fn insert_with_delivery(
        &self,
        transaction: &Transaction,
        delivery: &Delivery,
    ) -> RepositoryResult<Transaction> {
        let mut transactions = self.transactions.write().await;
        transactions.insert(transaction.id, transaction.clone());
        drop(transactions);

        self.deliveries.insert(delivery).await?;
        Ok(transaction.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Transaction>> {
        let transactions = self.transactions.read().await;
        Ok(transactions.get(&id).cloned())
    }

    async fn find_by_gateway_id(
        &self,
        gateway_id: &str,
    ) -> RepositoryResult<Option<Transaction>> {
        let transactions = self.transactions.read().await;
        Ok(transactions
            .values()
            .find(|t| t.gateway_transaction_id.as_deref() == Some(gateway_id))
            .cloned())
    }

    async fn list(&self, limit: i64, offset: i64) -> RepositoryResult<Vec<Transaction>> {
        let transactions = self.transactions.read().await;
        let mut all: Vec<Transaction> = transactions.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn update(&self, transaction: &Transaction) -> RepositoryResult<Transaction> {
        let mut transactions = self.transactions.write().await;
        if !transactions.contains_key(&transaction.id) {
            return Err(RepositoryError::NotFound(format!(
                "Transaction {}",
                transaction.id
            )));
        }
        transactions.insert(transaction.id, transaction.clone());
        Ok(transaction.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_decrement_stock_is_conditional() {
        let repo = InMemoryProductRepository::new();
        let product = Product::new(
            "AirPods Pro 2".to_string(),
            "Active Noise Cancellation".to_string(),
            950_000,
            2,
            "https://example.com/airpods.jpg".to_string(),
        );
        repo.insert(&product).await.unwrap();

        assert!(repo.decrement_stock(product.id, 2).await.unwrap());
        assert!(!repo.decrement_stock(product.id, 1).await.unwrap());

        let stored = repo.find_by_id(product.id).await.unwrap().unwrap();
        assert_eq!(stored.stock, 0);
    }

    #[tokio::test]
    async fn test_find_available_excludes_sold_out() {
        let repo = InMemoryProductRepository::new();
        let in_stock = Product::new(
            "iPad Pro".to_string(),
            "M2 chip".to_string(),
            5_200_000,
            12,
            "https://example.com/ipad.jpg".to_string(),
        );
        let sold_out = Product::new(
            "MacBook Pro".to_string(),
            "M3 Pro chip".to_string(),
            8_500_000,
            0,
            "https://example.com/macbook.jpg".to_string(),
        );
        repo.insert(&in_stock).await.unwrap();
        repo.insert(&sold_out).await.unwrap();

        let available = repo.find_available().await.unwrap();
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].id, in_stock.id);
    }
}
