//! 请求级用户解析
//!
//! 每个请求独立解析：验证 Bearer token → 按 sub 查库 →（可选）激活校验。
//! 不做任何缓存，每次调用都重新验签、重新查询。
//!
//! 失败语义固定：
//! - token 缺失 / 验签失败 / claims 格式不符 → 403
//! - sub 对应用户不存在 → 404
//! - 用户已停用（仅 active 校验）→ 400

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts, HeaderMap};

use crate::error::{Result, ServerError};
use crate::http::AppState;
use crate::model::User;

/// 从 Authorization header 提取 Bearer token
pub fn bearer_token(headers: &HeaderMap) -> Result<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| ServerError::Unauthenticated("缺少 Bearer token".to_string()))
}

/// 验证 token 并加载对应用户
pub async fn current_user(state: &AppState, token: &str) -> Result<User> {
    let claims = state.jwt_service.verify_token(token)?;
    let user_id = claims.subject_id()?;

    state
        .user_store
        .get(user_id)
        .await?
        .ok_or_else(|| ServerError::UserNotFound(user_id.to_string()))
}

/// 验证 token 并加载用户，额外要求用户处于激活状态
pub async fn current_active_user(state: &AppState, token: &str) -> Result<User> {
    let user = current_user(state, token).await?;
    if !user.is_active {
        return Err(ServerError::BadRequest("Inactive user".to_string()));
    }
    Ok(user)
}

/// 提取器：已认证用户（不校验激活状态）
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ServerError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> std::result::Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;
        let user = current_user(state, token).await?;
        Ok(CurrentUser(user))
    }
}

/// 提取器：已认证且处于激活状态的用户
pub struct CurrentActiveUser(pub User);

impl FromRequestParts<AppState> for CurrentActiveUser {
    type Rejection = ServerError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> std::result::Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;
        let user = current_active_user(state, token).await?;
        Ok(CurrentActiveUser(user))
    }
}
