//! 图片上传路由
//!
//! 路由：
//! - POST /api/images/upload - 单张上传（multipart，file 字段）
//! - POST /api/images/batch  - 批量上传（multipart，重复的 files 字段）
//! - GET  /api/images        - 图片记录列表
//!
//! 认证：上传路由挂 editor 门禁；列表只要求激活用户。

use axum::{
    extract::{Extension, State},
    middleware,
    response::Json,
    routing::{get, post},
    Router,
};
use axum_extra::extract::Multipart;
use bytes::Bytes;
use tracing::info;

use crate::auth::RoleGate;
use crate::error::{Result, ServerError};
use crate::http::extract::CurrentActiveUser;
use crate::http::middleware::require_role;
use crate::http::AppState;
use crate::model::{Image, User};

/// 创建图片路由（上传部分挂角色门禁）
pub fn create_route(state: AppState, gate: RoleGate) -> Router<AppState> {
    let guarded = Router::new()
        .route("/api/images/upload", post(upload_image))
        .route("/api/images/batch", post(upload_images))
        .layer(middleware::from_fn_with_state((state, gate), require_role));

    Router::new()
        .route("/api/images", get(list_images))
        .merge(guarded)
}

/// 图片记录列表
async fn list_images(
    State(state): State<AppState>,
    CurrentActiveUser(_user): CurrentActiveUser,
) -> Result<Json<Vec<Image>>> {
    let images = state.image_service.list_images().await?;
    Ok(Json(images))
}

/// 单张上传处理器
async fn upload_image(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    mut multipart: Multipart,
) -> Result<Json<Image>> {
    let mut uploaded: Option<(String, Bytes)> = None;

    // 解析 multipart/form-data：file 必填
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServerError::Validation(format!("解析 multipart 失败: {}", e)))?
    {
        if field.name().unwrap_or("") == "file" {
            let filename = field.file_name().unwrap_or("upload").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| ServerError::Validation(format!("读取文件数据失败: {}", e)))?;
            uploaded = Some((filename, data));
        }
    }

    let (filename, data) =
        uploaded.ok_or_else(|| ServerError::Validation("缺少文件数据".to_string()))?;

    info!("📤 用户 {} 上传图片: {}", user.id, filename);

    let record = state.image_service.ingest(&filename, data).await?;
    Ok(Json(record))
}

/// 批量上传处理器：files 字段可重复，按出现顺序处理
async fn upload_images(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    mut multipart: Multipart,
) -> Result<Json<Vec<Image>>> {
    let mut files: Vec<(String, Bytes)> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServerError::Validation(format!("解析 multipart 失败: {}", e)))?
    {
        if field.name().unwrap_or("") == "files" {
            let filename = field.file_name().unwrap_or("upload").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| ServerError::Validation(format!("读取文件数据失败: {}", e)))?;
            files.push((filename, data));
        }
    }

    if files.is_empty() {
        return Err(ServerError::Validation("缺少文件数据".to_string()));
    }

    info!("📤 用户 {} 批量上传 {} 张图片", user.id, files.len());

    let records = state.image_service.ingest_many(files).await?;
    Ok(Json(records))
}
