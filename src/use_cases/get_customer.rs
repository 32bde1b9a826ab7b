use std::sync::Arc;

use uuid::Uuid;

use crate::error::AppError;
use crate::ports::CustomerRepository;
use crate::use_cases::CustomerView;

pub struct GetCustomer {
    customers: Arc<dyn CustomerRepository>,
}

impl GetCustomer {
    pub fn new(customers: Arc<dyn CustomerRepository>) -> Self {
        Self { customers }
    }

    pub async fn execute(&self, id: Uuid) -> Result<CustomerView, AppError> {
        let customer = self
            .customers
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Customer"))?;

        Ok(CustomerView::from(&customer))
    }
}
