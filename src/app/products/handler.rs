//! 产品处理器

use std::collections::BTreeMap;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::Json,
};

use super::{
    model::{ListQuery, Product, SearchQuery},
    service::ProductService,
    validation::validate_product_payload,
};
use crate::core::{
    error::CoreError,
    extract::{QueryPairs, ResourceId},
    response::{DeleteResponse, ListResponse},
};

#[derive(Clone)]
pub struct AppState {
    pub product_service: ProductService,
}

impl AppState {
    pub fn new(product_service: ProductService) -> Self {
        Self { product_service }
    }
}

/// GET /api/products
pub async fn list_products(
    State(state): State<AppState>,
    pairs: QueryPairs,
) -> Result<Json<ListResponse<Product>>, CoreError> {
    let page = state.product_service.list_products(&ListQuery::from(&pairs))?;
    Ok(Json(page))
}

/// GET /api/products/:id
pub async fn get_product(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> Result<Json<Product>, CoreError> {
    let product = state.product_service.get_product(&id)?;
    Ok(Json(product))
}

/// POST /api/products
pub async fn create_product(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Product>), CoreError> {
    let payload = validate_product_payload(&body)?;
    let product = state.product_service.create_product(payload)?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /api/products/:id
pub async fn update_product(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
    body: Bytes,
) -> Result<Json<Product>, CoreError> {
    let product = state
        .product_service
        .update_product(&id, validate_product_payload(&body))?;
    Ok(Json(product))
}

/// DELETE /api/products/:id
pub async fn delete_product(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> Result<Json<DeleteResponse<Product>>, CoreError> {
    let product = state.product_service.delete_product(&id)?;
    Ok(Json(DeleteResponse::deleted(product)))
}

/// GET /api/products/search?name=
pub async fn search_products(
    State(state): State<AppState>,
    pairs: QueryPairs,
) -> Result<Json<ListResponse<Product>>, CoreError> {
    // 重复给出时取第一个值
    let query = SearchQuery::from(&pairs);
    let name = query
        .name
        .first()
        .filter(|n| !n.is_empty())
        .ok_or_else(|| CoreError::missing_search_parameter("name"))?;

    let matches = state.product_service.search_products(name)?;
    Ok(Json(matches))
}

/// GET /api/products/stats
pub async fn product_stats(
    State(state): State<AppState>,
) -> Result<Json<BTreeMap<String, usize>>, CoreError> {
    let stats = state.product_service.stats()?;
    Ok(Json(stats))
}
