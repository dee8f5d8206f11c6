// 服务模块

pub mod image_service;

pub use image_service::ImageService;
