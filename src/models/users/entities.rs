use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::define_string_enum;

define_string_enum! {
    /// 内置角色
    #[derive(TS)]
    #[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
    pub enum UserRole {
        Admin => "admin",
        Teacher => "teacher",
        Student => "student",
        Accountant => "accountant",
    }
}

impl UserRole {
    pub fn admin_roles() -> &'static [UserRole] {
        &[Self::Admin]
    }
    /// 管理员、教师、财务
    pub fn staff_roles() -> &'static [UserRole] {
        &[Self::Admin, Self::Teacher, Self::Accountant]
    }
    pub fn teaching_roles() -> &'static [UserRole] {
        &[Self::Admin, Self::Teacher]
    }
    pub fn finance_roles() -> &'static [UserRole] {
        &[Self::Admin, Self::Accountant]
    }
}

define_string_enum! {
    /// 用户状态
    #[derive(TS)]
    #[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
    pub enum UserStatus {
        Active => "active",
        Inactive => "inactive",
        Suspended => "suspended",
    }
}

// 用户实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    #[ts(skip)]
    pub password_hash: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub gender: String,
    pub birth_date: chrono::NaiveDate,
    pub photo: Option<String>,
    pub status: UserStatus,
    /// 角色名列表
    pub roles: Vec<String>,
    /// 角色汇总后的权限 slug 列表
    pub permissions: Vec<String>,
    pub last_login_at: Option<chrono::DateTime<chrono::Utc>>,
    pub email_verified_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    pub fn has_role(&self, role: UserRole) -> bool {
        self.roles.iter().any(|r| r == role.as_str())
    }

    pub fn has_any_role(&self, roles: &[UserRole]) -> bool {
        roles.iter().any(|role| self.has_role(*role))
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(UserRole::Admin)
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// 写入 JWT 的主角色，按内置角色优先级选取
    pub fn primary_role(&self) -> String {
        UserRole::ALL
            .iter()
            .find(|role| self.has_role(**role))
            .map(|role| role.to_string())
            .or_else(|| self.roles.first().cloned())
            .unwrap_or_default()
    }

    // 生成 token 对（access + refresh）
    pub fn generate_token_pair(
        &self,
        refresh_token_expiry: Option<chrono::TimeDelta>,
    ) -> Result<crate::utils::jwt::TokenPair, String> {
        crate::utils::jwt::JwtUtils::generate_token_pair(
            self.id,
            &self.primary_role(),
            refresh_token_expiry,
        )
        .map_err(|e| format!("生成 token 对失败: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_roles(roles: &[&str]) -> User {
        User {
            id: 1,
            first_name: "Awa".into(),
            last_name: "Diallo".into(),
            email: "awa@example.com".into(),
            password_hash: String::new(),
            phone: String::new(),
            address: String::new(),
            city: String::new(),
            country: String::new(),
            gender: "female".into(),
            birth_date: chrono::NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            photo: None,
            status: UserStatus::Active,
            roles: roles.iter().map(|r| r.to_string()).collect(),
            permissions: vec![],
            last_login_at: None,
            email_verified_at: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_role_checks() {
        let user = user_with_roles(&["teacher", "librarian"]);
        assert!(user.has_role(UserRole::Teacher));
        assert!(!user.is_admin());
        assert!(user.has_any_role(UserRole::teaching_roles()));
        assert!(!user.has_any_role(UserRole::finance_roles()));
        assert_eq!(user.primary_role(), "teacher");
        assert_eq!(user.full_name(), "Awa Diallo");
    }

    #[test]
    fn test_primary_role_prefers_builtin_order() {
        assert_eq!(user_with_roles(&["student", "admin"]).primary_role(), "admin");
        assert_eq!(user_with_roles(&["librarian"]).primary_role(), "librarian");
        assert_eq!(user_with_roles(&[]).primary_role(), "");
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let mut user = user_with_roles(&["admin"]);
        user.password_hash = "secret-hash".into();
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret-hash"));
        assert!(json.contains("\"status\":\"active\""));
    }
}
