pub mod customer;
pub mod delivery;
pub mod product;
pub mod transaction;

pub use customer::Customer;
pub use delivery::{Delivery, DeliveryStatus};
pub use product::Product;
pub use transaction::{Transaction, TransactionStatus};
