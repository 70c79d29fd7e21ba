//! 请求体校验
//!
//! 先按 [`ProductPayload`] 解析（字段缺失或类型不符即失败），再检查字符串非空。
//! 对外只暴露笼统的 `Invalid product data`，具体原因写 debug 日志。

use tracing::debug;
use validator::{Validate, ValidationErrors};

use super::model::ProductPayload;
use crate::core::error::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum InvalidPayload {
    #[error("malformed payload: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("constraint violated: {0}")]
    Constraint(#[from] ValidationErrors),
}

pub fn validate_product_payload(body: &[u8]) -> Result<ProductPayload, InvalidPayload> {
    let payload: ProductPayload = serde_json::from_slice(body)?;
    payload.validate()?;
    Ok(payload)
}

impl From<InvalidPayload> for CoreError {
    fn from(err: InvalidPayload) -> Self {
        debug!(reason = %err, "产品数据校验失败");
        CoreError::invalid_product_data()
    }
}
