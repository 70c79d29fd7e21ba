//! 产品数据模型

use serde::{Deserialize, Serialize};
use serde_json::Number;
use validator::Validate;

use crate::core::extract::{QueryPairs, QueryValue};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: Number,
    pub category: String,
    pub in_stock: bool,
}

impl Product {
    pub fn from_payload(id: String, payload: ProductPayload) -> Self {
        Self {
            id,
            name: payload.name,
            description: payload.description,
            price: payload.price,
            category: payload.category,
            in_stock: payload.in_stock,
        }
    }

    /// 替换除 `id` 以外的所有字段
    pub fn replace_fields(&mut self, payload: ProductPayload) {
        self.name = payload.name;
        self.description = payload.description;
        self.price = payload.price;
        self.category = payload.category;
        self.in_stock = payload.in_stock;
    }
}

/// 创建/更新请求体
///
/// 类型由 serde 约束，非空由 validator 约束；未知字段忽略。
#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub description: String,
    pub price: Number,
    #[validate(length(min = 1))]
    pub category: String,
    pub in_stock: bool,
}

/// `GET /api/products` 查询参数
///
/// 保留原始取值（含重复键），由服务层解释。
#[derive(Debug, Default)]
pub struct ListQuery {
    pub category: QueryValue,
    pub page: QueryValue,
    pub limit: QueryValue,
}

impl From<&QueryPairs> for ListQuery {
    fn from(pairs: &QueryPairs) -> Self {
        Self {
            category: pairs.value("category"),
            page: pairs.value("page"),
            limit: pairs.value("limit"),
        }
    }
}

/// `GET /api/products/search` 查询参数
#[derive(Debug, Default)]
pub struct SearchQuery {
    pub name: QueryValue,
}

impl From<&QueryPairs> for SearchQuery {
    fn from(pairs: &QueryPairs) -> Self {
        Self {
            name: pairs.value("name"),
        }
    }
}
