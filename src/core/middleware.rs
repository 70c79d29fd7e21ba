//! 核心中间件模块
//!
//! 请求依次经过：错误兜底 → 请求日志 → API Key 认证 → 路由分发。
//! [`with_pipeline`] 在启动时按这个顺序组装各层。

use std::{any::Any, sync::Arc, time::Instant};

use axum::{
    extract::{Request, State},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;
use tracing::{info, warn};

use super::error::CoreError;

/// 认证请求头
pub const API_KEY_HEADER: &str = "x-api-key";

/// 共享密钥
#[derive(Clone)]
pub struct ApiKey(Arc<str>);

impl ApiKey {
    pub fn new(key: impl AsRef<str>) -> Self {
        Self(Arc::from(key.as_ref()))
    }

    pub fn matches(&self, candidate: &str) -> bool {
        *self.0 == *candidate
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// 为路由套上完整的请求管道
///
/// 后添加的层在外侧，所以错误兜底最先看到请求。
pub fn with_pipeline<S>(router: Router<S>, api_key: ApiKey) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .fallback(route_not_found)
        .layer(middleware::from_fn_with_state(api_key, api_key_middleware))
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(CatchPanicLayer::custom(handle_panic))
}

/// 请求日志中间件
pub async fn request_logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let received_at = chrono::Utc::now().to_rfc3339();
    let method = req.method().clone();
    let path = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    info!("[{}] {} {}", received_at, method, path);

    let response = next.run(req).await;

    info!(
        "{} {} - {} - {}ms",
        method,
        path,
        response.status(),
        start.elapsed().as_millis()
    );

    response
}

/// API Key 认证中间件
pub async fn api_key_middleware(
    State(api_key): State<ApiKey>,
    req: Request,
    next: Next,
) -> Result<Response, CoreError> {
    let authorized = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(|key| api_key.matches(key));

    match authorized {
        Some(true) => Ok(next.run(req).await),
        Some(false) => {
            warn!("API Key 不匹配: {} {}", req.method(), req.uri().path());
            Err(CoreError::Unauthorized)
        }
        None => {
            warn!("缺少 API Key: {} {}", req.method(), req.uri().path());
            Err(CoreError::Unauthorized)
        }
    }
}

async fn route_not_found() -> CoreError {
    CoreError::NotFound("Not found".to_string())
}

/// 把处理器中的 panic 转成 500
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    CoreError::InternalServerError(format!("handler panicked: {}", detail)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode, routing::get};
    use std::{
        io,
        sync::Mutex,
    };
    use tower::ServiceExt;

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_request_completion_logged_at_info() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let app: Router = with_pipeline(
            Router::new().route("/ping", get(|| async { "pong" })),
            ApiKey::new("k"),
        );
        let req = axum::http::Request::builder()
            .uri("/ping?x=1")
            .header(API_KEY_HEADER, "k")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("GET /ping?x=1 - 200 OK"), "{}", output);
    }

    #[test]
    fn test_api_key_matches_exactly() {
        let key = ApiKey::new("Yousecurekey");
        assert!(key.matches("Yousecurekey"));
        assert!(!key.matches("yousecurekey"));
        assert!(!key.matches(""));
    }

    #[test]
    fn test_api_key_debug_is_redacted() {
        let key = ApiKey::new("Yousecurekey");
        assert_eq!(format!("{:?}", key), "ApiKey(***)");
    }

    #[test]
    fn test_handle_panic_returns_500() {
        let response = handle_panic(Box::new("boom"));
        assert_eq!(response.status(), axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    }
}
