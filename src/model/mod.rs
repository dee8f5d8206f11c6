// 数据模型模块

pub mod image;
pub mod user;

pub use image::Image;
pub use user::{User, UserRole};
