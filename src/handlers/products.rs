use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use uuid::Uuid;

use crate::AppState;
use crate::error::AppError;
use crate::use_cases::{GetProduct, GetProducts, ProductView};

#[utoipa::path(
    get,
    path = "/products",
    responses(
        (status = 200, description = "Products with stock remaining", body = [ProductView])
    ),
    tag = "products"
)]
pub async fn get_products(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let use_case = GetProducts::new(state.products.clone());
    let products = use_case.execute().await?;

    Ok(Json(products))
}

#[utoipa::path(
    get,
    path = "/products/{id}",
    params(("id" = Uuid, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product details", body = ProductView),
        (status = 404, description = "Product not found")
    ),
    tag = "products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let use_case = GetProduct::new(state.products.clone());
    let product = use_case.execute(id).await?;

    Ok(Json(product))
}
