//! HTTP 模块 - Axum 服务器、路由与请求级认证

pub mod extract;
pub mod middleware;
pub mod routes;
pub mod server;

use std::sync::Arc;

use crate::auth::JwtService;
use crate::repository::UserStore;
use crate::service::ImageService;

/// HTTP 服务器共享状态
#[derive(Clone)]
pub struct AppState {
    pub jwt_service: Arc<JwtService>,
    pub user_store: Arc<dyn UserStore>,
    pub image_service: Arc<ImageService>,
}

pub use server::HttpServer;
