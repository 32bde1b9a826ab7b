use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Catalog product. Prices are integer Colombian pesos.
#[derive(Debug, Clone)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub stock: i32,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn new(
        name: String,
        description: String,
        price: i64,
        stock: i32,
        image_url: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            description,
            price,
            stock,
            image_url,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn has_stock(&self, quantity: i32) -> bool {
        self.stock >= quantity
    }
}
