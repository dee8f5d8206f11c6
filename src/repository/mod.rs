//! 仓库模块
//!
//! 存储操作通过 trait 抽象：本服务只消费 create/get 语义，不定义存储模式。
//! 生产实现基于 PostgreSQL；测试可注入内存实现。

pub mod image_repo;
pub mod user_repo;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{Image, User};

/// 用户存储（本服务只读）
#[async_trait]
pub trait UserStore: Send + Sync {
    /// 按ID查找用户
    async fn get(&self, user_id: u64) -> Result<Option<User>>;
}

/// 图片记录存储
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// 创建一条图片记录并返回（含生成的 id）
    async fn create(&self, url: &str) -> Result<Image>;
    /// 按上传时间列出全部记录
    async fn list(&self) -> Result<Vec<Image>>;
}

pub use image_repo::PgImageRepository;
pub use user_repo::PgUserRepository;
