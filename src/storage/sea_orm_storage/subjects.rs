//! 科目存储操作

use std::collections::BTreeSet;

use super::{SeaOrmStorage, classify_write_error, soft_delete};
use crate::entity::prelude::{
    AcademicYears, Courses, Departments, TeacherSubjectActiveModel, TeacherSubjects, Teachers,
};
use crate::entity::subjects::{ActiveModel, Column, Entity as Subjects, Model};
use crate::entity::{courses, teacher_subjects, teachers};
use crate::errors::{Result, SchoolError};
use crate::models::{
    PaginatedResponse, PaginationInfo, RecordStatus,
    subjects::{
        entities::{Subject, SubjectDetail},
        requests::{CreateSubjectRequest, SubjectListQuery, UpdateSubjectRequest},
    },
    teachers::entities::TeacherSummary,
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建科目并分配教师
    pub async fn create_subject_impl(&self, req: CreateSubjectRequest) -> Result<SubjectDetail> {
        self.ensure_live::<Departments>(req.department_id, "院系")
            .await?;
        self.ensure_live::<AcademicYears>(req.academic_year_id, "学年")
            .await?;

        let now = chrono::Utc::now().timestamp();
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolError::database_operation(format!("开启事务失败: {e}")))?;

        let subject = ActiveModel {
            name: Set(req.name),
            code: Set(req.code),
            department_id: Set(req.department_id),
            description: Set(req.description),
            academic_year_id: Set(req.academic_year_id),
            status: Set(req.status.unwrap_or(RecordStatus::Active).to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| classify_write_error("创建科目", e))?;

        replace_subject_teachers(&txn, subject.id, &req.teacher_ids).await?;

        txn.commit()
            .await
            .map_err(|e| SchoolError::database_operation(format!("提交事务失败: {e}")))?;

        self.load_subject_detail(subject).await
    }

    /// 获取科目及任课教师
    pub async fn get_subject_detail_impl(&self, id: i64) -> Result<Option<SubjectDetail>> {
        match self.find_subject(id).await? {
            Some(model) => Ok(Some(self.load_subject_detail(model).await?)),
            None => Ok(None),
        }
    }

    /// 分页列出科目
    pub async fn list_subjects_with_pagination_impl(
        &self,
        query: SubjectListQuery,
    ) -> Result<PaginatedResponse<Subject>> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Subjects::find().filter(Column::DeletedAt.is_null());

        if let Some(department_id) = query.department_id {
            select = select.filter(Column::DepartmentId.eq(department_id));
        }
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

        let paginator = select.order_by_asc(Column::Code).paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询科目总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询科目页数失败: {e}")))?;
        let subjects = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询科目列表失败: {e}")))?;

        Ok(PaginatedResponse {
            items: subjects.into_iter().map(|m| m.into_subject()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 更新科目
    pub async fn update_subject_impl(
        &self,
        id: i64,
        update: UpdateSubjectRequest,
    ) -> Result<Option<SubjectDetail>> {
        if self.find_subject(id).await?.is_none() {
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
        if let Some(department_id) = update.department_id {
            self.ensure_live::<Departments>(department_id, "院系").await?;
            model.department_id = Set(department_id);
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
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
            .map_err(|e| classify_write_error("更新科目", e))?;

        Ok(Some(self.load_subject_detail(result).await?))
    }

    /// 同步科目的任课教师
    pub async fn sync_subject_teachers_impl(
        &self,
        id: i64,
        teacher_ids: Vec<i64>,
    ) -> Result<Option<SubjectDetail>> {
        let Some(model) = self.find_subject(id).await? else {
            return Ok(None);
        };

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolError::database_operation(format!("开启事务失败: {e}")))?;

        replace_subject_teachers(&txn, id, &teacher_ids).await?;

        txn.commit()
            .await
            .map_err(|e| SchoolError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(Some(self.load_subject_detail(model).await?))
    }

    /// 软删除科目，仍有课程时拒绝
    pub async fn delete_subject_impl(&self, id: i64) -> Result<bool> {
        let course_refs = Courses::find()
            .filter(courses::Column::SubjectId.eq(id))
            .filter(courses::Column::DeletedAt.is_null())
            .count(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("统计科目课程失败: {e}")))?;
        if course_refs > 0 {
            return Err(SchoolError::conflict(format!(
                "科目仍被 {course_refs} 门课程引用"
            )));
        }

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolError::database_operation(format!("开启事务失败: {e}")))?;

        let deleted = soft_delete::<Subjects, _>(&txn, id)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除科目失败: {e}")))?;
        if deleted {
            TeacherSubjects::delete_many()
                .filter(teacher_subjects::Column::SubjectId.eq(id))
                .exec(&txn)
                .await
                .map_err(|e| SchoolError::database_operation(format!("解除科目教师失败: {e}")))?;
        }

        txn.commit()
            .await
            .map_err(|e| SchoolError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(deleted)
    }

    async fn find_subject(&self, id: i64) -> Result<Option<Model>> {
        Subjects::find_by_id(id)
            .filter(Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询科目失败: {e}")))
    }

    async fn load_subject_detail(&self, model: Model) -> Result<SubjectDetail> {
        let teacher_ids: Vec<i64> = TeacherSubjects::find()
            .filter(teacher_subjects::Column::SubjectId.eq(model.id))
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询科目教师失败: {e}")))?
            .into_iter()
            .map(|link| link.teacher_id)
            .collect();

        Ok(SubjectDetail {
            subject: model.into_subject(),
            teachers: self.teacher_summaries(teacher_ids).await?,
        })
    }

    /// 按 ID 加载教师摘要
    pub(crate) async fn teacher_summaries(&self, ids: Vec<i64>) -> Result<Vec<TeacherSummary>> {
        let teachers = Teachers::find()
            .filter(teachers::Column::Id.is_in(ids))
            .filter(teachers::Column::DeletedAt.is_null())
            .order_by_asc(teachers::Column::LastName)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询教师失败: {e}")))?;

        Ok(teachers.into_iter().map(|t| t.into_summary()).collect())
    }
}

/// 用给定教师替换科目的全部任课教师
async fn replace_subject_teachers<C: ConnectionTrait>(
    conn: &C,
    subject_id: i64,
    teacher_ids: &[i64],
) -> Result<()> {
    let unique: BTreeSet<i64> = teacher_ids.iter().copied().collect();
    let found = Teachers::find()
        .filter(teachers::Column::Id.is_in(unique.iter().copied()))
        .filter(teachers::Column::DeletedAt.is_null())
        .count(conn)
        .await
        .map_err(|e| SchoolError::database_operation(format!("查询教师失败: {e}")))?;
    if found as usize != unique.len() {
        return Err(SchoolError::validation("包含不存在的教师"));
    }

    TeacherSubjects::delete_many()
        .filter(teacher_subjects::Column::SubjectId.eq(subject_id))
        .exec(conn)
        .await
        .map_err(|e| SchoolError::database_operation(format!("清除科目教师失败: {e}")))?;

    let now = chrono::Utc::now().timestamp();
    for teacher_id in unique {
        TeacherSubjectActiveModel {
            teacher_id: Set(teacher_id),
            subject_id: Set(subject_id),
            created_at: Set(now),
        }
        .insert(conn)
        .await
        .map_err(|e| classify_write_error("分配科目教师", e))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{memory_storage, seed_school};
    use crate::errors::SchoolError;
    use crate::models::subjects::requests::CreateSubjectRequest;

    #[tokio::test]
    async fn test_subject_teachers_sync() {
        let storage = memory_storage().await;
        let school = seed_school(&storage).await;

        let detail = storage
            .get_subject_detail_impl(school.subject_id)
            .await
            .unwrap()
            .unwrap();
        assert!(detail.teachers.is_empty());

        let detail = storage
            .sync_subject_teachers_impl(school.subject_id, vec![school.teacher_id])
            .await
            .unwrap()
            .unwrap();
        assert_eq!(detail.teachers.len(), 1);
        assert_eq!(detail.teachers[0].id, school.teacher_id);

        let err = storage
            .sync_subject_teachers_impl(school.subject_id, vec![9999])
            .await
            .unwrap_err();
        assert!(matches!(err, SchoolError::Validation(_)));
    }

    #[tokio::test]
    async fn test_duplicate_code_conflict() {
        let storage = memory_storage().await;
        let school = seed_school(&storage).await;
        let err = storage
            .create_subject_impl(CreateSubjectRequest {
                name: "Algèbre".into(),
                code: "MATH".into(),
                department_id: school.department_id,
                description: None,
                academic_year_id: school.year_id,
                status: None,
                teacher_ids: vec![],
            })
            .await
            .unwrap_err();
        assert!(matches!(err, SchoolError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_delete_refused_while_courses_exist() {
        let storage = memory_storage().await;
        let school = seed_school(&storage).await;
        let err = storage
            .delete_subject_impl(school.subject_id)
            .await
            .unwrap_err();
        assert!(matches!(err, SchoolError::Conflict(_)));
    }
}
