mod common;

use std::collections::HashSet;

use common::{MockGateway, TestContext, delivery_info, seed_customer, seed_product};

use checkout_core::domain::{DeliveryStatus, TransactionStatus};
use checkout_core::error::AppError;
use checkout_core::ports::{DeliveryRepository, ProductRepository, TransactionRepository};
use checkout_core::use_cases::CreateTransaction;
use checkout_core::use_cases::create_transaction::{
    BASE_FEE, CreateTransactionInput, DELIVERY_FEE_PER_UNIT,
};

#[tokio::test]
async fn test_total_amount_breakdown() {
    let ctx = TestContext::new(MockGateway::answering(TransactionStatus::Approved));
    let product = seed_product(&ctx, 4_500_000, 15).await;
    let customer = seed_customer(&ctx).await;

    let view = common::create_pending_transaction(&ctx, &product, &customer, 1).await;

    assert_eq!(view.total_amount, 4_507_000);
    assert_eq!(view.breakdown.product_amount, 4_500_000);
    assert_eq!(view.breakdown.base_fee, 2_000);
    assert_eq!(view.breakdown.delivery_fee, 5_000);
    assert_eq!(view.status, TransactionStatus::Pending);
    assert!(view.transaction_number.starts_with("TXN-"));
}

#[tokio::test]
async fn test_fee_formula_holds_across_quantities() {
    let price = 950_000;
    let ctx = TestContext::new(MockGateway::answering(TransactionStatus::Approved));
    let product = seed_product(&ctx, price, 50).await;
    let customer = seed_customer(&ctx).await;

    for quantity in 1..=5 {
        let view = common::create_pending_transaction(&ctx, &product, &customer, quantity).await;
        let q = i64::from(quantity);
        assert_eq!(
            view.total_amount,
            price * q + BASE_FEE + DELIVERY_FEE_PER_UNIT * q
        );
    }
}

#[tokio::test]
async fn test_insufficient_stock_persists_nothing() {
    let ctx = TestContext::new(MockGateway::answering(TransactionStatus::Approved));
    let product = seed_product(&ctx, 4_500_000, 15).await;
    let customer = seed_customer(&ctx).await;

    let result = ctx
        .create_transaction()
        .execute(CreateTransactionInput {
            customer_id: customer.id,
            product_id: product.id,
            quantity: 20,
            delivery: delivery_info(),
        })
        .await;

    match result {
        Err(AppError::InsufficientStock {
            available,
            requested,
        }) => {
            assert_eq!(available, 15);
            assert_eq!(requested, 20);
        }
        other => panic!("expected InsufficientStock, got {:?}", other.map(|v| v.id)),
    }

    let stored = ctx.transactions.list(10, 0).await.unwrap();
    assert!(stored.is_empty());
}

#[tokio::test]
async fn test_missing_product_is_not_found() {
    let ctx = TestContext::new(MockGateway::answering(TransactionStatus::Approved));
    let customer = seed_customer(&ctx).await;

    let result = ctx
        .create_transaction()
        .execute(CreateTransactionInput {
            customer_id: customer.id,
            product_id: uuid::Uuid::new_v4(),
            quantity: 1,
            delivery: delivery_info(),
        })
        .await;

    assert!(matches!(result, Err(AppError::NotFound(what)) if what == "Product"));
}

#[tokio::test]
async fn test_missing_customer_is_not_found() {
    let ctx = TestContext::new(MockGateway::answering(TransactionStatus::Approved));
    let product = seed_product(&ctx, 4_500_000, 15).await;

    let result = ctx
        .create_transaction()
        .execute(CreateTransactionInput {
            customer_id: uuid::Uuid::new_v4(),
            product_id: product.id,
            quantity: 1,
            delivery: delivery_info(),
        })
        .await;

    assert!(matches!(result, Err(AppError::NotFound(what)) if what == "Customer"));
}

#[tokio::test]
async fn test_delivery_created_alongside_transaction() {
    let ctx = TestContext::new(MockGateway::answering(TransactionStatus::Approved));
    let product = seed_product(&ctx, 4_500_000, 15).await;
    let customer = seed_customer(&ctx).await;

    let view = common::create_pending_transaction(&ctx, &product, &customer, 2).await;

    let delivery = ctx
        .deliveries
        .find_by_transaction_id(view.id)
        .await
        .unwrap()
        .expect("delivery should exist");
    assert_eq!(delivery.delivery_status, DeliveryStatus::Pending);
    assert_eq!(delivery.address, "Calle 100 #8-60");
    assert_eq!(delivery.city, "Bogota");

    // Creation must not touch stock.
    let stored = ctx
        .products
        .find_by_id(product.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.stock, 15);
}

#[tokio::test]
async fn test_transaction_numbers_unique_across_concurrent_creations() {
    let ctx = TestContext::new(MockGateway::answering(TransactionStatus::Approved));
    let product = seed_product(&ctx, 950_000, 100).await;
    let customer = seed_customer(&ctx).await;

    let mut tasks = tokio::task::JoinSet::new();
    for _ in 0..20 {
        let transactions = ctx.transactions.clone();
        let products = ctx.products.clone();
        let customers = ctx.customers.clone();
        let input = CreateTransactionInput {
            customer_id: customer.id,
            product_id: product.id,
            quantity: 1,
            delivery: delivery_info(),
        };
        tasks.spawn(async move {
            let use_case = CreateTransaction::new(transactions, products, customers);
            use_case.execute(input).await.unwrap().transaction_number
        });
    }

    let mut numbers = HashSet::new();
    while let Some(result) = tasks.join_next().await {
        numbers.insert(result.unwrap());
    }

    assert_eq!(numbers.len(), 20);
}
