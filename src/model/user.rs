use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 用户角色
///
/// 角色是封闭枚举：路由上配置的角色一定在此表中，非法角色在编译期即不可表示。
/// 仅从字符串构造（配置文件 / 数据库行）时才可能失败。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// 普通成员
    Member,
    /// 编辑（可上传图片）
    Editor,
    /// 版主
    Moderator,
    /// 管理员
    Admin,
}

impl UserRole {
    /// 角色 power：数值越大权限越高，门禁按「不低于」比较
    pub fn power(self) -> u8 {
        match self {
            UserRole::Member => 10,
            UserRole::Editor => 20,
            UserRole::Moderator => 30,
            UserRole::Admin => 40,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UserRole::Member => "member",
            UserRole::Editor => "editor",
            UserRole::Moderator => "moderator",
            UserRole::Admin => "admin",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "member" => Some(UserRole::Member),
            "editor" => Some(UserRole::Editor),
            "moderator" => Some(UserRole::Moderator),
            "admin" => Some(UserRole::Admin),
            _ => None,
        }
    }
}

/// 用户信息
///
/// 本服务对用户只读（激活标志仅用于校验），写入由外部账号系统负责。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// 用户ID
    pub id: u64, // 数据库中是 BIGINT
    /// 用户名
    pub username: String,
    /// 邮箱
    pub email: Option<String>,
    /// 角色
    pub role: UserRole,
    /// 是否激活（停用用户不允许通过 active 校验）
    pub is_active: bool,
    /// 创建时间（数据库存储为 BIGINT 毫秒时间戳）
    pub created_at: DateTime<Utc>,
    /// 更新时间（数据库存储为 BIGINT 毫秒时间戳）
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// 创建新用户（测试与工具代码使用）
    pub fn new(id: u64, username: String, role: UserRole) -> Self {
        let now = Utc::now();
        Self {
            id,
            username,
            email: None,
            role,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// 从数据库行创建（处理时间戳和类型转换）
    pub fn from_db_row(
        user_id: i64, // PostgreSQL BIGINT
        username: String,
        email: Option<String>,
        role: String,
        is_active: bool,
        created_at: i64, // 毫秒时间戳
        updated_at: i64, // 毫秒时间戳
    ) -> Self {
        Self {
            id: user_id as u64,
            username,
            email,
            // 数据库中出现未知角色按最低权限处理
            role: UserRole::from_str(&role).unwrap_or(UserRole::Member),
            is_active,
            created_at: DateTime::from_timestamp_millis(created_at).unwrap_or_else(Utc::now),
            updated_at: DateTime::from_timestamp_millis(updated_at).unwrap_or_else(Utc::now),
        }
    }
}
