use serde::{Deserialize, Serialize};

use crate::error::{Result, ServerError};

/// JWT Token Claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// JWT 标准字段 - 主题 (用户ID)
    pub sub: String,
    /// JWT 标准字段 - 过期时间 (Unix timestamp)
    pub exp: i64,
    /// JWT 标准字段 - 签发时间
    pub iat: i64,
    /// JWT 标准字段 - JWT ID
    pub jti: String,
}

impl TokenClaims {
    /// 解析 sub 为用户ID
    ///
    /// sub 不是数字说明 claims 不符合约定格式，等同于凭证无法验证。
    pub fn subject_id(&self) -> Result<u64> {
        self.sub
            .parse::<u64>()
            .map_err(|_| ServerError::Unauthenticated(format!("无效的 sub: {}", self.sub)))
    }
}
