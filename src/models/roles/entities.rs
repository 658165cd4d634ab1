use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 权限
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/role.ts")]
pub struct Permission {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 角色（附带权限列表）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/role.ts")]
pub struct Role {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub permissions: Vec<Permission>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 启动时写入的默认权限目录：(slug, 名称)
pub const DEFAULT_PERMISSIONS: &[(&str, &str)] = &[
    ("users.manage", "Manage users"),
    ("roles.manage", "Manage roles and permissions"),
    ("academic_years.manage", "Manage academic years"),
    ("departments.manage", "Manage departments"),
    ("subjects.manage", "Manage subjects"),
    ("teachers.manage", "Manage teachers"),
    ("students.manage", "Manage students"),
    ("students.view", "View students"),
    ("courses.manage", "Manage courses"),
    ("enrollments.manage", "Manage enrollments"),
    ("grades.manage", "Record grades"),
    ("grades.view", "View grades"),
    ("schedules.manage", "Manage schedules"),
    ("payments.manage", "Manage payments"),
    ("reports.generate", "Generate reports"),
    ("reports.view", "View reports"),
];

/// 内置角色默认拥有的权限
pub fn default_role_permissions(role: &str) -> Vec<&'static str> {
    match role {
        "admin" => DEFAULT_PERMISSIONS.iter().map(|(slug, _)| *slug).collect(),
        "teacher" => vec!["students.view", "grades.manage", "grades.view", "reports.view"],
        "accountant" => vec![
            "students.view",
            "payments.manage",
            "reports.generate",
            "reports.view",
        ],
        "student" => vec!["grades.view"],
        _ => vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validate::validate_slug;

    #[test]
    fn test_default_catalogue_slugs_are_valid() {
        for (slug, _) in DEFAULT_PERMISSIONS {
            assert!(validate_slug(slug).is_ok(), "invalid slug {slug}");
        }
    }

    #[test]
    fn test_role_defaults_reference_catalogue() {
        for role in ["admin", "teacher", "accountant", "student"] {
            for slug in default_role_permissions(role) {
                assert!(DEFAULT_PERMISSIONS.iter().any(|(s, _)| *s == slug));
            }
        }
        assert_eq!(
            default_role_permissions("admin").len(),
            DEFAULT_PERMISSIONS.len()
        );
        assert!(default_role_permissions("librarian").is_empty());
    }
}
