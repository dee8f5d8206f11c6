// 基础设施模块

pub mod database;

pub use database::Database;
