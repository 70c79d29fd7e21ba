//! 核心错误处理模块

use axum::{
    extract::rejection::{PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use super::response::MessageResponse;

/// 核心错误类型
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Unauthorized: Invalid API key")]
    Unauthorized,
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
    /// 内部细节只写日志，不返回给客户端
    #[error("internal error: {0}")]
    InternalServerError(String),
}

impl CoreError {
    pub fn product_not_found() -> Self {
        CoreError::NotFound("Product not found".to_string())
    }

    pub fn invalid_product_data() -> Self {
        CoreError::BadRequest("Invalid product data".to_string())
    }

    pub fn missing_search_parameter(name: &str) -> Self {
        CoreError::BadRequest(format!("Missing search parameter: {}", name))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            CoreError::Unauthorized => StatusCode::UNAUTHORIZED,
            CoreError::NotFound(_) => StatusCode::NOT_FOUND,
            CoreError::BadRequest(_) => StatusCode::BAD_REQUEST,
            CoreError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            CoreError::InternalServerError(detail) => {
                error!(%detail, "请求处理失败");
                "Server error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(MessageResponse::new(message))).into_response()
    }
}

impl From<QueryRejection> for CoreError {
    fn from(rejection: QueryRejection) -> Self {
        CoreError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for CoreError {
    fn from(rejection: PathRejection) -> Self {
        match rejection {
            // 例如 id 段不是合法 UTF-8，这样的记录不可能存在
            PathRejection::FailedToDeserializePathParams(_) => CoreError::product_not_found(),
            other => CoreError::InternalServerError(other.body_text()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(CoreError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(CoreError::product_not_found().status(), StatusCode::NOT_FOUND);
        assert_eq!(CoreError::invalid_product_data().status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            CoreError::InternalServerError("lock poisoned".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CoreError::Unauthorized.to_string(),
            "Unauthorized: Invalid API key"
        );
        assert_eq!(
            CoreError::missing_search_parameter("name").to_string(),
            "Missing search parameter: name"
        );
    }

    #[tokio::test]
    async fn test_internal_error_hides_detail() {
        let response = CoreError::InternalServerError("secret detail".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value, serde_json::json!({ "message": "Server error" }));
    }
}
