//! 院系存储操作

use super::{SeaOrmStorage, classify_write_error, soft_delete};
use crate::entity::departments::{ActiveModel, Column, Entity as Departments};
use crate::entity::prelude::{AcademicYears, Courses, Subjects, Teachers};
use crate::entity::{courses, subjects, teachers};
use crate::errors::{Result, SchoolError};
use crate::models::{
    PaginatedResponse, PaginationInfo, RecordStatus,
    departments::{
        entities::Department,
        requests::{CreateDepartmentRequest, DepartmentListQuery, UpdateDepartmentRequest},
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建院系
    pub async fn create_department_impl(&self, req: CreateDepartmentRequest) -> Result<Department> {
        self.ensure_live::<AcademicYears>(req.academic_year_id, "学年")
            .await?;
        if let Some(head_teacher_id) = req.head_teacher_id {
            self.ensure_live::<Teachers>(head_teacher_id, "教师").await?;
        }

        let now = chrono::Utc::now().timestamp();
        let result = ActiveModel {
            name: Set(req.name),
            code: Set(req.code),
            description: Set(req.description),
            head_teacher_id: Set(req.head_teacher_id),
            academic_year_id: Set(req.academic_year_id),
            status: Set(req.status.unwrap_or(RecordStatus::Active).to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| classify_write_error("创建院系", e))?;

        Ok(result.into_department())
    }

    /// 通过 ID 获取院系
    pub async fn get_department_by_id_impl(&self, id: i64) -> Result<Option<Department>> {
        let result = Departments::find_by_id(id)
            .filter(Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询院系失败: {e}")))?;

        Ok(result.map(|m| m.into_department()))
    }

    /// 分页列出院系
    pub async fn list_departments_with_pagination_impl(
        &self,
        query: DepartmentListQuery,
    ) -> Result<PaginatedResponse<Department>> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Departments::find().filter(Column::DeletedAt.is_null());

        if let Some(academic_year_id) = query.academic_year_id {
            select = select.filter(Column::AcademicYearId.eq(academic_year_id));
        }
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Name.contains(&escaped))
                    .add(Column::Code.contains(&escaped)),
            );
        }

        let paginator = select.order_by_asc(Column::Name).paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询院系总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询院系页数失败: {e}")))?;
        let departments = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询院系列表失败: {e}")))?;

        Ok(PaginatedResponse {
            items: departments.into_iter().map(|m| m.into_department()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 更新院系
    pub async fn update_department_impl(
        &self,
        id: i64,
        update: UpdateDepartmentRequest,
    ) -> Result<Option<Department>> {
        if self.get_department_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };
        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(code) = update.code {
            model.code = Set(code);
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(head_teacher_id) = update.head_teacher_id {
            let teacher = Teachers::find_by_id(head_teacher_id)
                .filter(teachers::Column::DeletedAt.is_null())
                .one(&self.db)
                .await
                .map_err(|e| SchoolError::database_operation(format!("查询教师失败: {e}")))?
                .ok_or_else(|| SchoolError::validation(format!("教师 {head_teacher_id} 不存在")))?;
            if teacher.department_id != id {
                return Err(SchoolError::validation("系主任必须是本院系的教师"));
            }
            model.head_teacher_id = Set(Some(head_teacher_id));
        }
        if let Some(academic_year_id) = update.academic_year_id {
            self.ensure_live::<AcademicYears>(academic_year_id, "学年")
                .await?;
            model.academic_year_id = Set(academic_year_id);
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| classify_write_error("更新院系", e))?;

        Ok(Some(result.into_department()))
    }

    /// 软删除院系，仍有教师、科目或课程时拒绝
    pub async fn delete_department_impl(&self, id: i64) -> Result<bool> {
        let teacher_refs = Teachers::find()
            .filter(teachers::Column::DepartmentId.eq(id))
            .filter(teachers::Column::DeletedAt.is_null())
            .count(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("统计院系教师失败: {e}")))?;
        let subject_refs = Subjects::find()
            .filter(subjects::Column::DepartmentId.eq(id))
            .filter(subjects::Column::DeletedAt.is_null())
            .count(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("统计院系科目失败: {e}")))?;
        let course_refs = Courses::find()
            .filter(courses::Column::DepartmentId.eq(id))
            .filter(courses::Column::DeletedAt.is_null())
            .count(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("统计院系课程失败: {e}")))?;

        if teacher_refs + subject_refs + course_refs > 0 {
            return Err(SchoolError::conflict("院系下仍有教师、科目或课程"));
        }

        soft_delete::<Departments, _>(&self.db, id)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除院系失败: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{memory_storage, seed_school, teacher_request};
    use crate::errors::SchoolError;
    use crate::models::departments::requests::{CreateDepartmentRequest, UpdateDepartmentRequest};

    #[tokio::test]
    async fn test_head_teacher_must_belong_to_department() {
        let storage = memory_storage().await;
        let school = seed_school(&storage).await;

        let other = storage
            .create_department_impl(CreateDepartmentRequest {
                name: "Lettres".into(),
                code: "LET".into(),
                description: None,
                head_teacher_id: None,
                academic_year_id: school.year_id,
                status: None,
            })
            .await
            .unwrap();

        let err = storage
            .update_department_impl(
                other.id,
                UpdateDepartmentRequest {
                    head_teacher_id: Some(school.teacher_id),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, SchoolError::Validation(_)));

        let updated = storage
            .update_department_impl(
                school.department_id,
                UpdateDepartmentRequest {
                    head_teacher_id: Some(school.teacher_id),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.head_teacher_id, Some(school.teacher_id));
    }

    #[tokio::test]
    async fn test_delete_refused_with_members() {
        let storage = memory_storage().await;
        let school = seed_school(&storage).await;
        storage
            .create_teacher_impl(teacher_request("second@example.com", school.department_id))
            .await
            .unwrap();

        let err = storage
            .delete_department_impl(school.department_id)
            .await
            .unwrap_err();
        assert!(matches!(err, SchoolError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_unknown_academic_year_rejected() {
        let storage = memory_storage().await;
        let err = storage
            .create_department_impl(CreateDepartmentRequest {
                name: "Sciences".into(),
                code: "SCI".into(),
                description: None,
                head_teacher_id: None,
                academic_year_id: 404,
                status: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, SchoolError::Validation(_)));
    }
}
