//! HTTP 路由模块
//!
//! 路由结构：
//! - `GET  /health` - 存活探测（无认证）
//! - `GET  /api/users/me` - 当前激活用户
//! - `GET  /api/images` - 图片记录列表（激活用户）
//! - `POST /api/images/upload` - 单张上传（editor 门禁）
//! - `POST /api/images/batch` - 批量上传（editor 门禁）

pub mod health;
pub mod upload;
pub mod user;

use axum::Router;

use crate::auth::RoleGate;
use crate::http::AppState;
use crate::model::UserRole;

/// 创建所有路由
pub fn create_routes(state: AppState) -> Router<AppState> {
    // 上传路由的门禁在路由声明期构造一次
    let upload_gate = RoleGate::new(UserRole::Editor);

    Router::new()
        .merge(health::create_route())
        .merge(user::create_route())
        .merge(upload::create_route(state, upload_gate))
}
