use anyhow::Context;
use product_api::{
    build_router,
    infrastructure::{config::load_config, logger::Logger},
    ApiKey, AppState, ProductService, ProductStore,
};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config().context("加载配置失败")?;

    // 初始化日志
    Logger::init(&config.logging.level);

    info!("启动产品 API 服务器...");

    let store = ProductStore::seeded();
    info!("✅ 已初始化 {} 个示例产品", store.len());

    let state = AppState::new(ProductService::new(store));
    let app = build_router(state, ApiKey::new(&config.auth.api_key));

    let addr = config.server.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("无法绑定到 {}", addr))?;

    info!("🚀 Server is running on http://{}", addr);
    info!("📖 API 端点:");
    info!("   GET    /api/products          - 产品列表 (category, page, limit)");
    info!("   GET    /api/products/:id      - 获取产品");
    info!("   POST   /api/products          - 创建产品");
    info!("   PUT    /api/products/:id      - 更新产品");
    info!("   DELETE /api/products/:id      - 删除产品");
    info!("   GET    /api/products/search   - 按名称搜索 (name)");
    info!("   GET    /api/products/stats    - 按分类统计");

    axum::serve(listener, app).await.context("服务器运行失败")?;
    Ok(())
}
