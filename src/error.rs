use std::error::Error as StdError;
use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};

/// 服务器错误类型
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ServerError {
    /// 内部错误
    Internal(String),
    /// 数据库错误
    Database(String),
    /// 配置错误（启动期致命，不会出现在单次请求处理中）
    Configuration(String),
    /// 验证错误（请求格式/表单字段）
    Validation(String),
    /// 凭证无法验证（签名错误、过期、claims 格式不符）
    Unauthenticated(String),
    /// 无效令牌
    InvalidToken,
    /// 用户未找到（token 的 sub 在库中不存在）
    UserNotFound(String),
    /// 资源未找到
    NotFound(String),
    /// 错误请求（如用户已停用）
    BadRequest(String),
    /// 权限不足（角色 power 低于路由要求）
    Forbidden(String),
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::Internal(msg) => write!(f, "Internal error: {}", msg),
            ServerError::Database(msg) => write!(f, "Database error: {}", msg),
            ServerError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            ServerError::Validation(msg) => write!(f, "Validation error: {}", msg),
            ServerError::Unauthenticated(msg) => write!(f, "Could not validate credentials: {}", msg),
            ServerError::InvalidToken => write!(f, "Invalid token"),
            ServerError::UserNotFound(id) => write!(f, "User not found: {}", id),
            ServerError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ServerError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ServerError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
        }
    }
}

impl StdError for ServerError {}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        // 注意：凭证无法验证按约定返回 403（与外部账号系统保持一致），而非 401
        let status_code = match &self {
            ServerError::Unauthenticated(_) | ServerError::InvalidToken => StatusCode::FORBIDDEN,
            ServerError::Forbidden(_) => StatusCode::FORBIDDEN,
            ServerError::UserNotFound(_) | ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::BadRequest(_) | ServerError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let error_response = ErrorResponse::new(&self);
        (status_code, Json(error_response)).into_response()
    }
}

impl From<std::io::Error> for ServerError {
    fn from(err: std::io::Error) -> Self {
        ServerError::Internal(err.to_string())
    }
}

impl From<sqlx::Error> for ServerError {
    fn from(err: sqlx::Error) -> Self {
        ServerError::Database(err.to_string())
    }
}

impl From<image::ImageError> for ServerError {
    fn from(err: image::ImageError) -> Self {
        ServerError::Internal(format!("图像处理失败: {}", err))
    }
}

/// 结果类型别名
pub type Result<T> = std::result::Result<T, ServerError>;

/// 错误代码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    /// 内部错误
    Internal = 1000,
    /// 数据库错误
    Database = 2000,
    /// 配置错误
    Configuration = 2003,
    /// 验证错误
    Validation = 4001,
    /// 凭证无法验证
    Unauthenticated = 5001,
    /// 无效令牌
    InvalidToken = 5002,
    /// 用户未找到
    UserNotFound = 5004,
    /// 资源未找到
    NotFound = 5005,
    /// 错误请求
    BadRequest = 5006,
    /// 禁止访问
    Forbidden = 5007,
}

impl From<&ServerError> for ErrorCode {
    fn from(error: &ServerError) -> Self {
        match error {
            ServerError::Internal(_) => ErrorCode::Internal,
            ServerError::Database(_) => ErrorCode::Database,
            ServerError::Configuration(_) => ErrorCode::Configuration,
            ServerError::Validation(_) => ErrorCode::Validation,
            ServerError::Unauthenticated(_) => ErrorCode::Unauthenticated,
            ServerError::InvalidToken => ErrorCode::InvalidToken,
            ServerError::UserNotFound(_) => ErrorCode::UserNotFound,
            ServerError::NotFound(_) => ErrorCode::NotFound,
            ServerError::BadRequest(_) => ErrorCode::BadRequest,
            ServerError::Forbidden(_) => ErrorCode::Forbidden,
        }
    }
}

/// 错误响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// 错误代码
    pub code: ErrorCode,
    /// 错误消息
    pub message: String,
    /// 详细信息
    pub details: Option<String>,
    /// 时间戳
    pub timestamp: u64,
}

impl ErrorResponse {
    /// 创建错误响应
    pub fn new(error: &ServerError) -> Self {
        Self {
            code: ErrorCode::from(error),
            message: error.to_string(),
            details: None,
            timestamp: chrono::Utc::now().timestamp() as u64,
        }
    }
}
