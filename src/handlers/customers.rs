use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::AppState;
use crate::error::AppError;
use crate::use_cases::create_customer::CreateCustomerInput;
use crate::use_cases::{CreateCustomer, CustomerView, GetCustomer};
use crate::validation::{validate_email, validate_min_len};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerPayload {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

#[utoipa::path(
    post,
    path = "/customers",
    request_body = CreateCustomerPayload,
    responses(
        (status = 201, description = "Customer created", body = CustomerView),
        (status = 200, description = "Customer with this email already exists", body = CustomerView),
        (status = 400, description = "Invalid input")
    ),
    tag = "customers"
)]
pub async fn create_customer(
    State(state): State<AppState>,
    Json(payload): Json<CreateCustomerPayload>,
) -> Result<impl IntoResponse, AppError> {
    validate_min_len("name", &payload.name, 2)?;
    validate_email("email", &payload.email)?;

    let use_case = CreateCustomer::new(state.customers.clone());
    let output = use_case
        .execute(CreateCustomerInput {
            name: payload.name,
            email: payload.email,
            phone: payload.phone,
        })
        .await?;

    let status = if output.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, Json(output.customer)))
}

#[utoipa::path(
    get,
    path = "/customers/{id}",
    params(("id" = Uuid, Path, description = "Customer id")),
    responses(
        (status = 200, description = "Customer details", body = CustomerView),
        (status = 404, description = "Customer not found")
    ),
    tag = "customers"
)]
pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let use_case = GetCustomer::new(state.customers.clone());
    let customer = use_case.execute(id).await?;

    Ok(Json(customer))
}
