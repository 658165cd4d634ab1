//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。
//! 除关联表外，所有表都带 deleted_at 软删除标记。

pub mod prelude;

pub mod academic_years;
pub mod course_enrollments;
pub mod course_teachers;
pub mod courses;
pub mod departments;
pub mod grades;
pub mod payment_details;
pub mod payments;
pub mod permissions;
pub mod reports;
pub mod role_permissions;
pub mod roles;
pub mod schedules;
pub mod students;
pub mod subjects;
pub mod teacher_subjects;
pub mod teachers;
pub mod user_roles;
pub mod users;

use sea_orm::EntityTrait;

/// 带 deleted_at 列的实体
pub trait SoftDeletable: EntityTrait {
    fn id() -> Self::Column;
    fn deleted_at() -> Self::Column;
}

macro_rules! impl_soft_deletable {
    ($($module:ident),+ $(,)?) => {
        $(
            impl SoftDeletable for $module::Entity {
                fn id() -> $module::Column {
                    $module::Column::Id
                }
                fn deleted_at() -> $module::Column {
                    $module::Column::DeletedAt
                }
            }
        )+
    };
}

impl_soft_deletable!(
    academic_years,
    course_enrollments,
    courses,
    departments,
    grades,
    payment_details,
    payments,
    permissions,
    reports,
    roles,
    schedules,
    students,
    subjects,
    teachers,
    users,
);
