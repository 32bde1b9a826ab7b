use std::sync::Arc;

use crate::error::AppError;
use crate::ports::ProductRepository;
use crate::use_cases::ProductView;

pub struct GetProducts {
    products: Arc<dyn ProductRepository>,
}

impl GetProducts {
    pub fn new(products: Arc<dyn ProductRepository>) -> Self {
        Self { products }
    }

    pub async fn execute(&self) -> Result<Vec<ProductView>, AppError> {
        let products = self.products.find_available().await?;
        Ok(products.iter().map(ProductView::from).collect())
    }
}
