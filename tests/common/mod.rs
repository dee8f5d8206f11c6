//! 集成测试公共设施：内存存储、测试状态、multipart 构造

use std::collections::HashMap;
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use bytes::Bytes;
use chrono::Utc;
use http_body_util::BodyExt;
use tower::ServiceExt;

use pixelgate::auth::JwtService;
use pixelgate::error::Result;
use pixelgate::http::server::build_router;
use pixelgate::http::AppState;
use pixelgate::model::{Image, User, UserRole};
use pixelgate::repository::{ImageStore, UserStore};
use pixelgate::service::ImageService;

pub const TEST_SECRET: &str = "integration-test-secret-32-chars!";

/// 内存用户存储
pub struct MemoryUserStore {
    users: Mutex<HashMap<u64, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
        }
    }

    pub fn insert(&self, user: User) {
        self.users.lock().unwrap().insert(user.id, user);
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn get(&self, user_id: u64) -> Result<Option<User>> {
        Ok(self.users.lock().unwrap().get(&user_id).cloned())
    }
}

/// 内存图片记录存储
pub struct MemoryImageStore {
    images: Mutex<Vec<Image>>,
}

impl MemoryImageStore {
    pub fn new() -> Self {
        Self {
            images: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ImageStore for MemoryImageStore {
    async fn create(&self, url: &str) -> Result<Image> {
        let mut images = self.images.lock().unwrap();
        let image = Image {
            id: images.len() as u64 + 1,
            url: url.to_string(),
            uploaded_at: Utc::now(),
        };
        images.push(image.clone());
        Ok(image)
    }

    async fn list(&self) -> Result<Vec<Image>> {
        Ok(self.images.lock().unwrap().clone())
    }
}

/// 测试上下文：路由 + 共享状态 + 临时静态目录
pub struct TestContext {
    pub router: Router,
    pub users: Arc<MemoryUserStore>,
    pub jwt_service: Arc<JwtService>,
    pub images_dir: PathBuf,
    _tempdir: tempfile::TempDir,
}

pub async fn setup() -> TestContext {
    let tempdir = tempfile::tempdir().unwrap();
    let users = Arc::new(MemoryUserStore::new());
    let image_store = Arc::new(MemoryImageStore::new());
    let jwt_service = Arc::new(JwtService::new(TEST_SECRET, 3600));

    let image_service = Arc::new(ImageService::new(
        image_store,
        tempdir.path().to_str().unwrap(),
        "http://localhost:8080/static",
        600,
    ));
    image_service.init().await.unwrap();

    let images_dir = image_service.images_dir().to_path_buf();

    let user_store: Arc<dyn UserStore> = users.clone();
    let state = AppState {
        jwt_service: jwt_service.clone(),
        user_store,
        image_service,
    };

    TestContext {
        router: build_router(state),
        users,
        jwt_service,
        images_dir,
        _tempdir: tempdir,
    }
}

impl TestContext {
    /// 注册一个用户并返回其 token
    pub fn seed_user(&self, id: u64, role: UserRole, is_active: bool) -> String {
        let mut user = User::new(id, format!("user{}", id), role);
        user.is_active = is_active;
        self.users.insert(user);
        self.jwt_service.issue_token(id, None).unwrap()
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = builder.body(Body::empty()).unwrap();
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// 发送 multipart 上传请求
    pub async fn post_multipart(
        &self,
        uri: &str,
        token: Option<&str>,
        parts: &[(&str, &str, Bytes)],
    ) -> Response<Body> {
        let boundary = "pixelgate-test-boundary";
        let body = multipart_body(boundary, parts);

        let mut builder = Request::builder().method("POST").uri(uri).header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        );
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = builder.body(Body::from(body)).unwrap();
        self.router.clone().oneshot(request).await.unwrap()
    }
}

/// 构造 multipart/form-data 请求体
pub fn multipart_body(boundary: &str, parts: &[(&str, &str, Bytes)]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, filename, data) in parts {
        body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                name, filename
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: image/png\r\n\r\n");
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", boundary).as_bytes());
    body
}

/// 读取响应体为 JSON
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// 生成一张纯色 PNG
pub fn png_bytes(width: u32, height: u32) -> Bytes {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([200, 100, 50]));
    let mut buf = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut buf, image::ImageFormat::Png)
        .unwrap();
    Bytes::from(buf.into_inner())
}
