mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use common::{MockGateway, TestContext, seed_customer, seed_product, sign_event};

use checkout_core::domain::TransactionStatus;
use checkout_core::ports::TransactionRepository;

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_create_customer_then_return_existing() {
    let ctx = TestContext::new(MockGateway::answering(TransactionStatus::Approved));
    let app = ctx.app();

    let payload = json!({
        "name": "Juan Perez",
        "email": "juan@example.com",
        "phone": "+573001234567"
    });

    let response = app
        .clone()
        .oneshot(post_json("/customers", payload.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let first = body_json(response).await;

    let response = app.oneshot(post_json("/customers", payload)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let second = body_json(response).await;

    assert_eq!(first["id"], second["id"]);
    assert_eq!(second["email"], "juan@example.com");
}

#[tokio::test]
async fn test_create_customer_rejects_invalid_email() {
    let ctx = TestContext::new(MockGateway::answering(TransactionStatus::Approved));
    let app = ctx.app();

    let response = app
        .oneshot(post_json(
            "/customers",
            json!({"name": "Juan Perez", "email": "not-an-email"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["kind"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_get_unknown_product_is_404() {
    let ctx = TestContext::new(MockGateway::answering(TransactionStatus::Approved));
    let app = ctx.app();

    let response = app
        .oneshot(get(&format!("/products/{}", uuid::Uuid::new_v4())))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["kind"], "NOT_FOUND");
    assert_eq!(body["error"], "Product not found");
}

#[tokio::test]
async fn test_products_lists_only_available() {
    let ctx = TestContext::new(MockGateway::answering(TransactionStatus::Approved));
    seed_product(&ctx, 4_500_000, 15).await;
    let app = ctx.app();

    let response = app.oneshot(get("/products")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let products = body.as_array().unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["price"], 4_500_000);
    assert_eq!(products[0]["imageUrl"], "https://example.com/iphone.jpg");
}

#[tokio::test]
async fn test_create_transaction_rejects_zero_quantity() {
    let ctx = TestContext::new(MockGateway::answering(TransactionStatus::Approved));
    let product = seed_product(&ctx, 4_500_000, 15).await;
    let customer = seed_customer(&ctx).await;
    let app = ctx.app();

    let response = app
        .oneshot(post_json(
            "/transactions",
            json!({
                "customerId": customer.id,
                "productId": product.id,
                "quantity": 0,
                "deliveryInfo": {"address": "Calle 100 #8-60", "city": "Bogota"}
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_transaction_conflict_on_insufficient_stock() {
    let ctx = TestContext::new(MockGateway::answering(TransactionStatus::Approved));
    let product = seed_product(&ctx, 4_500_000, 15).await;
    let customer = seed_customer(&ctx).await;
    let app = ctx.app();

    let response = app
        .oneshot(post_json(
            "/transactions",
            json!({
                "customerId": customer.id,
                "productId": product.id,
                "quantity": 20,
                "deliveryInfo": {"address": "Calle 100 #8-60", "city": "Bogota"}
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(body["kind"], "INSUFFICIENT_STOCK");
}

#[tokio::test]
async fn test_checkout_flow_over_http() {
    let ctx = TestContext::new(MockGateway::answering(TransactionStatus::Approved));
    let product = seed_product(&ctx, 4_500_000, 15).await;
    let customer = seed_customer(&ctx).await;
    let app = ctx.app();

    let response = app
        .clone()
        .oneshot(post_json(
            "/transactions",
            json!({
                "customerId": customer.id,
                "productId": product.id,
                "quantity": 1,
                "deliveryInfo": {
                    "address": "Calle 100 #8-60",
                    "city": "Bogota",
                    "department": "Cundinamarca",
                    "postalCode": "110111"
                }
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["totalAmount"], 4_507_000);
    assert_eq!(created["status"], "PENDING");
    assert_eq!(created["breakdown"]["baseFee"], 2_000);
    let id = created["id"].as_str().unwrap().to_string();

    // Declined and approved alike answer 200; status carries the outcome.
    let response = app
        .clone()
        .oneshot(post_json(
            &format!("/transactions/{}/payment", id),
            json!({
                "cardToken": "tok_stagtest_123",
                "customerEmail": "juan@example.com",
                "acceptanceToken": "eyJhbGciOiJIUzI1NiJ9.test"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let paid = body_json(response).await;
    assert_eq!(paid["status"], "APPROVED");

    // A second attempt conflicts.
    let response = app
        .clone()
        .oneshot(post_json(
            &format!("/transactions/{}/payment", id),
            json!({
                "cardToken": "tok_stagtest_123",
                "customerEmail": "juan@example.com",
                "acceptanceToken": "eyJhbGciOiJIUzI1NiJ9.test"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = app
        .oneshot(get(&format!("/transactions/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = body_json(response).await;
    assert_eq!(fetched["status"], "APPROVED");
    assert_eq!(fetched["delivery"]["city"], "Bogota");
}

#[tokio::test]
async fn test_webhook_rejects_bad_checksum() {
    let ctx = TestContext::new(MockGateway::answering(TransactionStatus::Approved));
    let app = ctx.app();

    let body = json!({
        "event": "transaction.updated",
        "data": {"transaction": {"id": "wompi-1", "status": "APPROVED"}}
    })
    .to_string();

    let request = Request::builder()
        .method("POST")
        .uri("/webhooks/wompi")
        .header(header::CONTENT_TYPE, "application/json")
        .header("X-Event-Checksum", "deadbeef")
        .body(Body::from(body))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_webhook_applies_terminal_status_to_pending_transaction() {
    let ctx = TestContext::new(MockGateway::answering(TransactionStatus::Approved));
    let product = seed_product(&ctx, 4_500_000, 15).await;
    let customer = seed_customer(&ctx).await;
    let created = common::create_pending_transaction(&ctx, &product, &customer, 1).await;

    // Pretend the charge was submitted but the gateway answered PENDING.
    let mut tx = ctx
        .transactions
        .find_by_id(created.id)
        .await
        .unwrap()
        .unwrap();
    tx.apply_gateway_status(TransactionStatus::Pending, Some("wompi-async-1".to_string()));
    ctx.transactions.update(&tx).await.unwrap();

    let body = json!({
        "event": "transaction.updated",
        "data": {"transaction": {"id": "wompi-async-1", "status": "APPROVED"}}
    })
    .to_string();

    let request = Request::builder()
        .method("POST")
        .uri("/webhooks/wompi")
        .header(header::CONTENT_TYPE, "application/json")
        .header("X-Event-Checksum", sign_event(body.as_bytes()))
        .body(Body::from(body))
        .unwrap();

    let response = ctx.app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let stored = ctx
        .transactions
        .find_by_id(created.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, TransactionStatus::Approved);
}
