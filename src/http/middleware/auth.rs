//! 认证中间件 - 角色门禁
//!
//! 挂在需要权限的路由上；先解析当前激活用户，再按门禁比较角色 power，
//! 通过后把用户写入 request extensions 供处理器使用。

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::auth::RoleGate;
use crate::error::Result;
use crate::http::extract::{bearer_token, current_active_user};
use crate::http::AppState;

/// 角色门禁中间件
pub async fn require_role(
    State((state, gate)): State<(AppState, RoleGate)>,
    mut request: Request,
    next: Next,
) -> Result<Response> {
    let token = bearer_token(request.headers())?.to_string();
    let user = current_active_user(&state, &token).await?;

    gate.check(&user)?;

    debug!(
        "🔐 门禁通过: user={} role={} required={}",
        user.id,
        user.role.as_str(),
        gate.required_role().as_str()
    );

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}
