pub mod adapters;
pub mod cli;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod ports;
pub mod use_cases;
pub mod validation;
pub mod wompi;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::ports::{
    CustomerRepository, DeliveryRepository, GatewayCustomer, PaymentGateway, ProductRepository,
    TransactionRepository,
};

#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub customers: Arc<dyn CustomerRepository>,
    pub products: Arc<dyn ProductRepository>,
    pub transactions: Arc<dyn TransactionRepository>,
    pub deliveries: Arc<dyn DeliveryRepository>,
    pub gateway: Arc<dyn PaymentGateway>,
    pub gateway_customer: GatewayCustomer,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::customers::create_customer,
        handlers::customers::get_customer,
        handlers::products::get_products,
        handlers::products::get_product,
        handlers::transactions::create_transaction,
        handlers::transactions::list_transactions,
        handlers::transactions::get_transaction,
        handlers::transactions::process_payment,
        handlers::webhook::wompi_event,
    ),
    components(schemas(
        handlers::HealthStatus,
        handlers::DbPoolStats,
        handlers::customers::CreateCustomerPayload,
        handlers::transactions::CreateTransactionPayload,
        handlers::transactions::DeliveryInfoPayload,
        handlers::transactions::PaymentPayload,
        use_cases::CustomerView,
        use_cases::ProductView,
        use_cases::TransactionView,
        use_cases::AmountBreakdown,
        use_cases::ProductSummary,
        use_cases::CustomerSummary,
        use_cases::DeliverySummary,
        domain::TransactionStatus,
        domain::DeliveryStatus,
    )),
    tags(
        (name = "health"),
        (name = "customers"),
        (name = "products"),
        (name = "transactions"),
        (name = "webhooks"),
    )
)]
pub struct ApiDoc;

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(handlers::health))
        .route("/customers", post(handlers::customers::create_customer))
        .route("/customers/:id", get(handlers::customers::get_customer))
        .route("/products", get(handlers::products::get_products))
        .route("/products/:id", get(handlers::products::get_product))
        .route(
            "/transactions",
            post(handlers::transactions::create_transaction)
                .get(handlers::transactions::list_transactions),
        )
        .route(
            "/transactions/:id",
            get(handlers::transactions::get_transaction),
        )
        .route(
            "/transactions/:id/payment",
            post(handlers::transactions::process_payment),
        )
        .route("/webhooks/wompi", post(handlers::webhook::wompi_event))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
