//! 图片记录仓库 - PostgreSQL 实现

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use crate::error::{Result, ServerError};
use crate::model::Image;
use crate::repository::ImageStore;

/// 图片记录仓库 (PostgreSQL 实现)
#[derive(Clone)]
pub struct PgImageRepository {
    pool: Arc<PgPool>,
}

impl PgImageRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ImageStore for PgImageRepository {
    async fn create(&self, url: &str) -> Result<Image> {
        let uploaded_at = Utc::now().timestamp_millis();

        let row: (i64,) = sqlx::query_as(
            r#"
            INSERT INTO pixelgate_images (url, uploaded_at)
            VALUES ($1, $2)
            RETURNING image_id
            "#,
        )
        .bind(url)
        .bind(uploaded_at)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| ServerError::Database(format!("插入图片记录失败: {}", e)))?;

        Ok(Image::from_db_row(row.0, url.to_string(), uploaded_at))
    }

    async fn list(&self) -> Result<Vec<Image>> {
        #[derive(sqlx::FromRow)]
        struct Row {
            image_id: i64,
            url: String,
            uploaded_at: i64,
        }

        let rows = sqlx::query_as::<_, Row>(
            "SELECT image_id, url, uploaded_at FROM pixelgate_images ORDER BY image_id",
        )
        .fetch_all(self.pool.as_ref())
        .await
        .map_err(|e| ServerError::Database(format!("查询图片记录失败: {}", e)))?;

        Ok(rows
            .into_iter()
            .map(|r| Image::from_db_row(r.image_id, r.url, r.uploaded_at))
            .collect())
    }
}
