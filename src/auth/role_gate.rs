//! 角色门禁
//!
//! 每个需要权限的路由配置一个门禁；不需要权限的路由不挂门禁即可。
//! 门禁比较当前用户角色的 power 与要求角色的 power，不低于即放行。

use crate::error::{Result, ServerError};
use crate::model::{User, UserRole};

/// 角色门禁：按「最低 power 阈值」放行，相等即通过
#[derive(Debug, Clone, Copy)]
pub struct RoleGate {
    required: UserRole,
}

impl RoleGate {
    /// 以枚举角色构造，不会失败（角色合法性由类型系统保证）
    pub fn new(required: UserRole) -> Self {
        Self { required }
    }

    /// 以角色名构造（配置文件场景）
    ///
    /// 未知角色名是配置错误，在启动期直接失败，不会拖到请求处理时才暴露。
    pub fn from_name(name: &str) -> Result<Self> {
        let required = UserRole::from_str(name)
            .ok_or_else(|| ServerError::Configuration(format!("未知角色: {}", name)))?;
        Ok(Self { required })
    }

    /// 要求的角色
    pub fn required_role(&self) -> UserRole {
        self.required
    }

    /// 校验用户权限
    pub fn check(&self, user: &User) -> Result<()> {
        if user.role.power() < self.required.power() {
            return Err(ServerError::Forbidden(
                "Operation not permitted".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_role(role: UserRole) -> User {
        User::new(1, "alice".to_string(), role)
    }

    #[test]
    fn test_gate_admits_equal_or_higher_power() {
        let gate = RoleGate::new(UserRole::Editor);

        assert!(gate.check(&user_with_role(UserRole::Editor)).is_ok());
        assert!(gate.check(&user_with_role(UserRole::Moderator)).is_ok());
        assert!(gate.check(&user_with_role(UserRole::Admin)).is_ok());
    }

    #[test]
    fn test_gate_rejects_lower_power() {
        let gate = RoleGate::new(UserRole::Moderator);

        for role in [UserRole::Member, UserRole::Editor] {
            let result = gate.check(&user_with_role(role));
            assert!(matches!(result, Err(ServerError::Forbidden(_))));
        }
    }

    #[test]
    fn test_gate_exhaustive_power_ordering() {
        let roles = [
            UserRole::Member,
            UserRole::Editor,
            UserRole::Moderator,
            UserRole::Admin,
        ];
        for required in roles {
            let gate = RoleGate::new(required);
            for actor in roles {
                let admitted = gate.check(&user_with_role(actor)).is_ok();
                assert_eq!(admitted, actor.power() >= required.power());
            }
        }
    }

    #[test]
    fn test_from_name_unknown_role_fails_at_construction() {
        let result = RoleGate::from_name("superuser");
        assert!(matches!(result, Err(ServerError::Configuration(_))));

        assert_eq!(
            RoleGate::from_name("admin").unwrap().required_role(),
            UserRole::Admin
        );
    }
}
