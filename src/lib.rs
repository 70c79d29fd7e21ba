//! # 产品目录 REST 服务
//!
//! 基于 Axum 的内存产品 CRUD 服务：
//! - 列表（分类过滤 + 分页）、按 id 查询、创建、更新、删除
//! - 按名称搜索、按分类统计
//! - 固定 API Key 认证

pub mod app;
pub mod core;
pub mod infrastructure;

pub use app::build_router;
pub use app::products::{handler::AppState, service::ProductService, store::ProductStore};
pub use crate::core::middleware::ApiKey;
