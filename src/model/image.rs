use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 图片记录
///
/// 上传成功后创建一次，之后不再修改；删除属于外部管理操作，不在本服务范围内。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    /// 图片ID（数据库 BIGSERIAL 自增）
    pub id: u64,
    /// 公开访问 URL（静态 URL 前缀 + 生成的文件名）
    pub url: String,
    /// 上传时间（数据库存储为 BIGINT 毫秒时间戳）
    pub uploaded_at: DateTime<Utc>,
}

impl Image {
    /// 从数据库行创建
    pub fn from_db_row(image_id: i64, url: String, uploaded_at: i64) -> Self {
        Self {
            id: image_id as u64,
            url,
            uploaded_at: DateTime::from_timestamp_millis(uploaded_at).unwrap_or_else(Utc::now),
        }
    }
}
