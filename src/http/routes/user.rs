//! 用户路由
//!
//! 路由：GET /api/users/me

use axum::{response::Json, routing::get, Router};

use crate::http::extract::CurrentActiveUser;
use crate::http::AppState;
use crate::model::User;

pub fn create_route() -> Router<AppState> {
    Router::new().route("/api/users/me", get(me))
}

/// 返回当前激活用户
async fn me(CurrentActiveUser(user): CurrentActiveUser) -> Json<User> {
    Json(user)
}
