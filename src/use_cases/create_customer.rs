//! Create customer use case. Creation is idempotent on email: an existing
//! customer is returned rather than duplicated.

use std::sync::Arc;

use crate::domain::Customer;
use crate::error::AppError;
use crate::ports::CustomerRepository;
use crate::use_cases::CustomerView;

#[derive(Debug)]
pub struct CreateCustomerInput {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

#[derive(Debug)]
pub struct CreateCustomerOutput {
    pub customer: CustomerView,
    pub created: bool,
}

pub struct CreateCustomer {
    customers: Arc<dyn CustomerRepository>,
}

impl CreateCustomer {
    pub fn new(customers: Arc<dyn CustomerRepository>) -> Self {
        Self { customers }
    }

    pub async fn execute(&self, input: CreateCustomerInput) -> Result<CreateCustomerOutput, AppError> {
        if let Some(existing) = self.customers.find_by_email(&input.email).await? {
            return Ok(CreateCustomerOutput {
                customer: CustomerView::from(&existing),
                created: false,
            });
        }

        let customer = Customer::new(input.name, input.email, input.phone);
        let saved = self.customers.insert(&customer).await?;

        Ok(CreateCustomerOutput {
            customer: CustomerView::from(&saved),
            created: true,
        })
    }
}
