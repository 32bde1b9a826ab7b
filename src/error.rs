use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::domain::TransactionStatus;
use crate::ports::{GatewayError, RepositoryError};
use crate::validation::ValidationError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("Insufficient stock. Available: {available}, Requested: {requested}")]
    InsufficientStock { available: i32, requested: i32 },

    #[error("Transaction cannot be processed. Current status: {0}")]
    InvalidState(TransactionStatus),

    #[error("Payment gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn not_found(what: impl Into<String>) -> Self {
        AppError::NotFound(what.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InsufficientStock { .. } => StatusCode::CONFLICT,
            AppError::InvalidState(_) => StatusCode::CONFLICT,
            AppError::Gateway(_) => StatusCode::BAD_GATEWAY,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable error tag, stable across message changes.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::InsufficientStock { .. } => "INSUFFICIENT_STOCK",
            AppError::InvalidState(_) => "INVALID_STATE",
            AppError::Gateway(_) => "GATEWAY_ERROR",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(what) => AppError::NotFound(what),
            RepositoryError::Database(e) => AppError::Database(e.to_string()),
            RepositoryError::Corrupt(msg) => AppError::Internal(msg),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({
            "error": self.to_string(),
            "kind": self.kind(),
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_status_code() {
        let error = AppError::not_found("Product");
        assert_eq!(error.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(error.to_string(), "Product not found");
    }

    #[test]
    fn test_insufficient_stock_status_code() {
        let error = AppError::InsufficientStock {
            available: 15,
            requested: 20,
        };
        assert_eq!(error.status_code(), StatusCode::CONFLICT);
        assert_eq!(error.kind(), "INSUFFICIENT_STOCK");
    }

    #[test]
    fn test_invalid_state_status_code() {
        let error = AppError::InvalidState(TransactionStatus::Approved);
        assert_eq!(error.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            error.to_string(),
            "Transaction cannot be processed. Current status: APPROVED"
        );
    }

    #[test]
    fn test_gateway_error_status_code() {
        let error = AppError::Gateway(GatewayError::InvalidResponse("truncated body".to_string()));
        assert_eq!(error.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_validation_error_status_code() {
        let error = AppError::Validation("quantity must be at least 1".to_string());
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_repository_not_found_maps_to_not_found() {
        let error: AppError = RepositoryError::NotFound("Transaction".to_string()).into();
        assert!(matches!(error, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_error_response_shape() {
        let error = AppError::not_found("Customer");
        let response = error.into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
