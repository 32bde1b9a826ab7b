pub mod in_memory;
pub mod postgres_customer_repository;
pub mod postgres_delivery_repository;
pub mod postgres_product_repository;
pub mod postgres_transaction_repository;

pub use postgres_customer_repository::PostgresCustomerRepository;
pub use postgres_delivery_repository::PostgresDeliveryRepository;
pub use postgres_product_repository::PostgresProductRepository;
pub use postgres_transaction_repository::PostgresTransactionRepository;
