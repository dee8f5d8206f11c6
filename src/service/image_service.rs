//! 图片服务 - 接收上传、落盘、入库、原地压缩
//!
//! 流程固定为：生成唯一文件名 → 分块写入磁盘 → 创建数据库记录（公开 URL）→
//! 原地缩放到限定边界内并统一转为 JPEG。记录在缩放之前创建，数据库短暂引用
//! 未缩放文件属于已接受的不一致窗口。

use std::path::{Path, PathBuf};
use std::sync::Arc;

use bytes::Bytes;
use image::{DynamicImage, ImageFormat};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::info;
use uuid::Uuid;

use crate::error::{Result, ServerError};
use crate::model::Image;
use crate::repository::ImageStore;

/// 磁盘写入分块大小
const UPLOAD_CHUNK_SIZE: usize = 1024;

/// 图片服务
pub struct ImageService {
    store: Arc<dyn ImageStore>,
    /// 落盘目录：{static_root}/images
    images_dir: PathBuf,
    /// 公开 URL 前缀：{static_url}/images
    public_base: String,
    /// 缩放边界（宽高上限，保持宽高比）
    max_dimension: u32,
}

impl ImageService {
    pub fn new(
        store: Arc<dyn ImageStore>,
        static_root: &str,
        static_url: &str,
        max_dimension: u32,
    ) -> Self {
        Self {
            store,
            images_dir: Path::new(static_root).join("images"),
            public_base: format!("{}/images", static_url.trim_end_matches('/')),
            max_dimension,
        }
    }

    /// 初始化：预创建图片存储目录
    pub async fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.images_dir).await.map_err(|e| {
            ServerError::Internal(format!(
                "创建图片存储目录失败 {:?}: {}",
                self.images_dir, e
            ))
        })?;
        Ok(())
    }

    /// 上传单张图片：落盘、入库、压缩，返回创建的记录
    pub async fn ingest(&self, original_filename: &str, data: Bytes) -> Result<Image> {
        let filename = generate_filename(original_filename);
        let out_path = self.images_dir.join(&filename);

        info!(
            "📤 接收图片: {} ({} bytes) -> {}",
            original_filename,
            data.len(),
            filename
        );

        // 分块写入目标路径；中断只会留下半截文件，不会留下数据库记录
        let mut out_file = fs::File::create(&out_path).await?;
        for chunk in data.chunks(UPLOAD_CHUNK_SIZE) {
            out_file.write_all(chunk).await?;
        }
        out_file.flush().await?;

        // 先入库再压缩（压缩失败时记录保留，与既有行为一致）
        let url = self.public_url(&filename);
        let record = self.store.create(&url).await?;

        let max = self.max_dimension;
        let resize_path = out_path.clone();
        tokio::task::spawn_blocking(move || shrink_to_fit(&resize_path, max))
            .await
            .map_err(|e| ServerError::Internal(format!("压缩任务失败: {}", e)))??;

        info!("✅ 图片上传完成: {}", record.url);

        Ok(record)
    }

    /// 批量上传：逐张独立处理，结果按输入顺序返回
    ///
    /// 单张失败直接向上传播，已完成的部分不回滚。
    pub async fn ingest_many(&self, files: Vec<(String, Bytes)>) -> Result<Vec<Image>> {
        let mut records = Vec::with_capacity(files.len());
        for (filename, data) in files {
            records.push(self.ingest(&filename, data).await?);
        }
        Ok(records)
    }

    /// 列出全部图片记录
    pub async fn list_images(&self) -> Result<Vec<Image>> {
        self.store.list().await
    }

    /// 由文件名拼接公开访问 URL
    pub fn public_url(&self, filename: &str) -> String {
        format!("{}/{}", self.public_base, filename)
    }

    /// 落盘目录
    pub fn images_dir(&self) -> &Path {
        &self.images_dir
    }
}

/// 生成新文件名：UUIDv4 + 原始扩展名（原始文件名只保留扩展名）
fn generate_filename(original: &str) -> String {
    let id = Uuid::new_v4();
    match Path::new(original).extension().and_then(|e| e.to_str()) {
        Some(ext) if !ext.is_empty() => format!("{}.{}", id, ext),
        _ => id.to_string(),
    }
}

/// 原地缩放：收缩到 max×max 边界内（保持宽高比），统一重编码为 JPEG 覆盖原文件
///
/// 阻塞调用，必须放在 spawn_blocking 中执行。
fn shrink_to_fit(path: &Path, max: u32) -> Result<()> {
    // 按内容而不是扩展名识别格式（文件名扩展来自客户端，不可信）
    let img = image::ImageReader::open(path)?
        .with_guessed_format()?
        .decode()?;

    let resized = if img.width() > max || img.height() > max {
        img.thumbnail(max, max)
    } else {
        img
    };

    // JPEG 不支持 alpha 通道，先转 RGB；无论输入格式，输出一律 JPEG
    let rgb = DynamicImage::ImageRgb8(resized.to_rgb8());
    rgb.save_with_format(path, ImageFormat::Jpeg)?;

    Ok(())
}
