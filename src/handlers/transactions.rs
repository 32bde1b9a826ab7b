use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::AppState;
use crate::error::AppError;
use crate::use_cases::create_transaction::{CreateTransactionInput, DeliveryInfo};
use crate::use_cases::process_payment::PaymentInput;
use crate::use_cases::{
    CreateTransaction, GetTransaction, ListTransactions, ProcessPayment, TransactionView,
};
use crate::validation::{validate_at_least, validate_email, validate_required};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryInfoPayload {
    pub address: String,
    pub city: String,
    pub department: Option<String>,
    pub postal_code: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionPayload {
    pub customer_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub delivery_info: DeliveryInfoPayload,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentPayload {
    pub card_token: String,
    pub customer_email: String,
    pub acceptance_token: String,
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[utoipa::path(
    post,
    path = "/transactions",
    request_body = CreateTransactionPayload,
    responses(
        (status = 201, description = "Transaction created in PENDING state", body = TransactionView),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Product or customer not found"),
        (status = 409, description = "Insufficient stock")
    ),
    tag = "transactions"
)]
pub async fn create_transaction(
    State(state): State<AppState>,
    Json(payload): Json<CreateTransactionPayload>,
) -> Result<impl IntoResponse, AppError> {
    validate_at_least("quantity", payload.quantity, 1)?;
    validate_required("address", &payload.delivery_info.address)?;
    validate_required("city", &payload.delivery_info.city)?;

    let use_case = CreateTransaction::new(
        state.transactions.clone(),
        state.products.clone(),
        state.customers.clone(),
    );
    let view = use_case
        .execute(CreateTransactionInput {
            customer_id: payload.customer_id,
            product_id: payload.product_id,
            quantity: payload.quantity,
            delivery: DeliveryInfo {
                address: payload.delivery_info.address,
                city: payload.delivery_info.city,
                department: payload.delivery_info.department,
                postal_code: payload.delivery_info.postal_code,
            },
        })
        .await?;

    Ok((StatusCode::CREATED, Json(view)))
}

#[utoipa::path(
    get,
    path = "/transactions",
    responses(
        (status = 200, description = "Transactions, newest first", body = [TransactionView])
    ),
    tag = "transactions"
)]
pub async fn list_transactions(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> Result<impl IntoResponse, AppError> {
    let limit = pagination.limit.unwrap_or(20);
    let offset = pagination.offset.unwrap_or(0);

    let use_case = ListTransactions::new(state.transactions.clone());
    let transactions = use_case.execute(limit, offset).await?;

    Ok(Json(transactions))
}

#[utoipa::path(
    get,
    path = "/transactions/{id}",
    params(("id" = Uuid, Path, description = "Transaction id")),
    responses(
        (status = 200, description = "Transaction with refreshed status", body = TransactionView),
        (status = 404, description = "Transaction not found")
    ),
    tag = "transactions"
)]
pub async fn get_transaction(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let use_case = GetTransaction::new(
        state.transactions.clone(),
        state.deliveries.clone(),
        state.gateway.clone(),
    );
    let view = use_case.execute(id).await?;

    Ok(Json(view))
}

#[utoipa::path(
    post,
    path = "/transactions/{id}/payment",
    params(("id" = Uuid, Path, description = "Transaction id")),
    request_body = PaymentPayload,
    responses(
        (status = 200, description = "Payment processed; the status field carries the outcome", body = TransactionView),
        (status = 400, description = "Invalid payment data"),
        (status = 404, description = "Transaction not found"),
        (status = 409, description = "Transaction already processed or insufficient stock"),
        (status = 502, description = "Payment gateway failure")
    ),
    tag = "transactions"
)]
pub async fn process_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<PaymentPayload>,
) -> Result<impl IntoResponse, AppError> {
    validate_required("cardToken", &payload.card_token)?;
    validate_email("customerEmail", &payload.customer_email)?;
    validate_required("acceptanceToken", &payload.acceptance_token)?;

    let use_case = ProcessPayment::new(
        state.transactions.clone(),
        state.products.clone(),
        state.gateway.clone(),
        state.gateway_customer.clone(),
    );
    let view = use_case
        .execute(
            id,
            PaymentInput {
                card_token: payload.card_token,
                customer_email: payload.customer_email,
                acceptance_token: payload.acceptance_token,
            },
        )
        .await?;

    // Declined and errored charges still answer 200; the status field is
    // the contract with the polling frontend.
    Ok(Json(view))
}
