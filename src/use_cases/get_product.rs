use std::sync::Arc;

use uuid::Uuid;

use crate::error::AppError;
use crate::ports::ProductRepository;
use crate::use_cases::ProductView;

pub struct GetProduct {
    products: Arc<dyn ProductRepository>,
}

impl GetProduct {
    pub fn new(products: Arc<dyn ProductRepository>) -> Self {
        Self { products }
    }

    pub async fn execute(&self, id: Uuid) -> Result<ProductView, AppError> {
        let product = self
            .products
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Product"))?;

        Ok(ProductView::from(&product))
    }
}
