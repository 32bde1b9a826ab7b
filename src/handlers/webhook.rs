//! Wompi event webhook.
//!
//! Events carry an HMAC checksum over the raw body; anything that fails the
//! constant-time check is rejected before the payload is even parsed. Only
//! PENDING transactions accept a status from an event — terminal states are
//! left untouched, so replayed events are harmless.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};

use crate::AppState;
use crate::domain::TransactionStatus;
use crate::error::AppError;
use crate::wompi::types::EventPayload;

pub const EVENT_CHECKSUM_HEADER: &str = "X-Event-Checksum";

#[utoipa::path(
    post,
    path = "/webhooks/wompi",
    responses(
        (status = 200, description = "Event accepted"),
        (status = 400, description = "Malformed event"),
        (status = 401, description = "Missing or invalid checksum")
    ),
    tag = "webhooks"
)]
pub async fn wompi_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let checksum = headers
        .get(EVENT_CHECKSUM_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("missing event checksum header".to_string()))?;

    if !state.gateway.verify_event_signature(&body, checksum) {
        tracing::warn!("rejected webhook event with invalid checksum");
        return Err(AppError::Unauthorized("invalid event checksum".to_string()));
    }

    let event: EventPayload = serde_json::from_slice(&body)
        .map_err(|e| AppError::Validation(format!("malformed event payload: {}", e)))?;

    let remote = event.data.transaction;
    tracing::info!(
        event = %event.event,
        gateway_id = %remote.id,
        status = %remote.status,
        "received gateway event"
    );

    match state.transactions.find_by_gateway_id(&remote.id).await? {
        Some(mut transaction)
            if transaction.can_be_processed() && remote.status != TransactionStatus::Pending =>
        {
            transaction.apply_gateway_status(remote.status, None);
            state.transactions.update(&transaction).await?;
            tracing::info!(
                transaction_number = %transaction.transaction_number,
                status = %transaction.status,
                "transaction updated from gateway event"
            );
        }
        Some(transaction) => {
            tracing::info!(
                transaction_number = %transaction.transaction_number,
                "ignoring event without a status change to apply"
            );
        }
        None => {
            tracing::warn!(gateway_id = %remote.id, "event references unknown transaction");
        }
    }

    Ok(StatusCode::OK)
}
