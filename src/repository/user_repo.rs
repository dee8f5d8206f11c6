//! 用户仓库 - PostgreSQL 实现

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::{Result, ServerError};
use crate::model::User;
use crate::repository::UserStore;

/// 用户仓库 (PostgreSQL 实现)
#[derive(Clone)]
pub struct PgUserRepository {
    pool: Arc<PgPool>,
}

impl PgUserRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserRepository {
    async fn get(&self, user_id: u64) -> Result<Option<User>> {
        #[derive(sqlx::FromRow)]
        struct UserRow {
            user_id: i64,
            username: String,
            email: Option<String>,
            role: String,
            is_active: bool,
            created_at: i64,
            updated_at: i64,
        }

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT user_id, username, email, role, is_active, created_at, updated_at
            FROM pixelgate_users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id as i64)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(|e| ServerError::Database(format!("查询用户失败: {}", e)))?;

        Ok(row.map(|r| {
            User::from_db_row(
                r.user_id,
                r.username,
                r.email,
                r.role,
                r.is_active,
                r.created_at,
                r.updated_at,
            )
        }))
    }
}
