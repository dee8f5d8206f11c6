//! HTTP 服务器 - 使用 Axum 提供认证与图片上传服务

use axum::Router;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::http::{routes, AppState};

/// 构建完整路由（测试可直接驱动，不需要绑定端口）
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::create_routes(state.clone()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// HTTP 服务器
pub struct HttpServer {
    state: AppState,
    host: String,
    port: u16,
}

impl HttpServer {
    pub fn new(state: AppState, host: String, port: u16) -> Self {
        Self { state, host, port }
    }

    /// 启动 HTTP 服务器
    pub async fn start(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let app = build_router(self.state.clone());

        let addr = format!("{}:{}", self.host, self.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;

        info!("🌐 HTTP 服务器启动在 {}", addr);

        axum::serve(listener, app).await?;

        Ok(())
    }
}
