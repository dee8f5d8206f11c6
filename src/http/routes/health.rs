//! 存活探测路由

use axum::{response::Json, routing::get, Router};
use serde_json::{json, Value};

use crate::http::AppState;

pub fn create_route() -> Router<AppState> {
    Router::new().route("/health", get(health_handler))
}

async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
