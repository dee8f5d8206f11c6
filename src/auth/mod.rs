// 认证模块 - JWT 验证与角色门禁

pub mod jwt_service;
pub mod models;
pub mod role_gate;

pub use jwt_service::JwtService;
pub use models::TokenClaims;
pub use role_gate::RoleGate;
