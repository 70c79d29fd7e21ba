//! 应用层：路由表

use axum::{routing::get, Router};

use crate::core::middleware::{with_pipeline, ApiKey};
use products::handler::{self, AppState};

pub mod products;

pub const WELCOME_TEXT: &str =
    "Welcome to the Product API! Go to /api/products to see all products.";

/// 组装完整应用
///
/// `search` 与 `stats` 是静态路径，路由匹配时优先于 `/api/products/:id`。
pub fn build_router(state: AppState, api_key: ApiKey) -> Router {
    let routes = Router::new()
        .route("/", get(welcome))
        .route(
            "/api/products",
            get(handler::list_products).post(handler::create_product),
        )
        .route("/api/products/search", get(handler::search_products))
        .route("/api/products/stats", get(handler::product_stats))
        .route(
            "/api/products/:id",
            get(handler::get_product)
                .put(handler::update_product)
                .delete(handler::delete_product),
        );

    with_pipeline(routes, api_key).with_state(state)
}

async fn welcome() -> &'static str {
    WELCOME_TEXT
}
