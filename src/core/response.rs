//! 核心响应处理模块

use serde::Serialize;

/// 只带消息的响应体，错误响应也使用它
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// 列表响应：`total` 是分页前的总数
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub results: Vec<T>,
    pub total: usize,
}

impl<T> ListResponse<T> {
    pub fn new(results: Vec<T>, total: usize) -> Self {
        Self { results, total }
    }
}

impl<T> From<Vec<T>> for ListResponse<T> {
    fn from(results: Vec<T>) -> Self {
        let total = results.len();
        Self { results, total }
    }
}

/// 删除成功后返回被删除的记录
#[derive(Debug, Serialize)]
pub struct DeleteResponse<T> {
    pub message: String,
    pub product: T,
}

impl<T> DeleteResponse<T> {
    pub fn deleted(product: T) -> Self {
        Self {
            message: "Product deleted".to_string(),
            product,
        }
    }
}
