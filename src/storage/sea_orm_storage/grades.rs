//! 成绩存储操作

use super::{SeaOrmStorage, classify_write_error, soft_delete};
use crate::entity::grades::{ActiveModel, Column, Entity as Grades};
use crate::entity::prelude::{CourseEnrollments, Teachers};
use crate::entity::course_enrollments;
use crate::errors::{Result, SchoolError};
use crate::models::{
    PaginatedResponse, PaginationInfo,
    enrollments::entities::EnrollmentStatus,
    grades::{
        entities::Grade,
        requests::{CreateGradeRequest, GradeListQuery, UpdateGradeRequest},
    },
};
use crate::utils::convert::format_date;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 录入成绩
    ///
    /// 选课记录必须存在、未退课且与学生和课程一致，学年取自选课记录。
    pub async fn create_grade_impl(&self, req: CreateGradeRequest, recorded_by: i64) -> Result<Grade> {
        let enrollment = CourseEnrollments::find_by_id(req.course_enrollment_id)
            .filter(course_enrollments::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询选课失败: {e}")))?
            .ok_or_else(|| {
                SchoolError::validation(format!("选课记录 {} 不存在", req.course_enrollment_id))
            })?;

        if enrollment.status == EnrollmentStatus::Dropped.as_str() {
            return Err(SchoolError::validation("学生已退选该课程"));
        }
        if enrollment.student_id != req.student_id || enrollment.course_id != req.course_id {
            return Err(SchoolError::validation("选课记录与学生或课程不匹配"));
        }
        self.ensure_live::<Teachers>(recorded_by, "教师").await?;

        let now = chrono::Utc::now().timestamp();
        let result = ActiveModel {
            student_id: Set(req.student_id),
            course_id: Set(req.course_id),
            course_enrollment_id: Set(enrollment.id),
            academic_year_id: Set(enrollment.academic_year_id),
            grade_value: Set(req.grade_value),
            grade_type: Set(req.grade_type.to_string()),
            evaluation_date: Set(format_date(req.evaluation_date)),
            recorded_by: Set(recorded_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| classify_write_error("录入成绩", e))?;

        Ok(result.into_grade())
    }

    /// 通过 ID 获取成绩
    pub async fn get_grade_by_id_impl(&self, id: i64) -> Result<Option<Grade>> {
        let result = Grades::find_by_id(id)
            .filter(Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询成绩失败: {e}")))?;

        Ok(result.map(|m| m.into_grade()))
    }

    /// 分页列出成绩
    pub async fn list_grades_with_pagination_impl(
        &self,
        query: GradeListQuery,
    ) -> Result<PaginatedResponse<Grade>> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Grades::find().filter(Column::DeletedAt.is_null());

        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(course_id) = query.course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }
        if let Some(academic_year_id) = query.academic_year_id {
            select = select.filter(Column::AcademicYearId.eq(academic_year_id));
        }
        if let Some(grade_type) = query.grade_type {
            select = select.filter(Column::GradeType.eq(grade_type.to_string()));
        }
        if let Some(recorded_by) = query.recorded_by {
            select = select.filter(Column::RecordedBy.eq(recorded_by));
        }

        let paginator = select
            .order_by_desc(Column::EvaluationDate)
            .order_by_desc(Column::Id)
            .paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询成绩总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询成绩页数失败: {e}")))?;
        let grades = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询成绩列表失败: {e}")))?;

        Ok(PaginatedResponse {
            items: grades.into_iter().map(|m| m.into_grade()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 更新成绩
    pub async fn update_grade_impl(
        &self,
        id: i64,
        update: UpdateGradeRequest,
    ) -> Result<Option<Grade>> {
        if self.get_grade_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };
        if let Some(value) = update.grade_value {
            model.grade_value = Set(value);
        }
        if let Some(grade_type) = update.grade_type {
            model.grade_type = Set(grade_type.to_string());
        }
        if let Some(date) = update.evaluation_date {
            model.evaluation_date = Set(format_date(date));
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| classify_write_error("更新成绩", e))?;

        Ok(Some(result.into_grade()))
    }

    /// 软删除成绩
    pub async fn delete_grade_impl(&self, id: i64) -> Result<bool> {
        soft_delete::<Grades, _>(&self.db, id)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除成绩失败: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{enrollment_request, grade_request, memory_storage, seed_school};
    use crate::errors::SchoolError;
    use crate::models::enrollments::entities::{EnrollOutcome, EnrollmentStatus};
    use crate::models::enrollments::requests::UpdateEnrollmentRequest;
    use crate::models::grades::requests::GradeListQuery;

    #[tokio::test]
    async fn test_grade_follows_enrollment() {
        let storage = memory_storage().await;
        let school = seed_school(&storage).await;
        let EnrollOutcome::Enrolled(enrollment) = storage
            .create_enrollment_impl(enrollment_request(school.student_id, school.course_id), false)
            .await
            .unwrap()
        else {
            panic!("expected enrollment");
        };

        let grade = storage
            .create_grade_impl(
                grade_request(school.student_id, school.course_id, enrollment.id, 14.5),
                school.teacher_id,
            )
            .await
            .unwrap();
        assert_eq!(grade.academic_year_id, enrollment.academic_year_id);
        assert_eq!(grade.recorded_by, school.teacher_id);

        let page = storage
            .list_grades_with_pagination_impl(GradeListQuery {
                student_id: Some(school.student_id),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.pagination.total, 1);

        let records = storage
            .list_student_grade_records_impl(school.student_id)
            .await
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].grade_value, 14.5);
    }

    #[tokio::test]
    async fn test_rejects_mismatch_and_dropped() {
        let storage = memory_storage().await;
        let school = seed_school(&storage).await;
        let EnrollOutcome::Enrolled(enrollment) = storage
            .create_enrollment_impl(enrollment_request(school.student_id, school.course_id), false)
            .await
            .unwrap()
        else {
            panic!("expected enrollment");
        };

        let err = storage
            .create_grade_impl(
                grade_request(school.student_id + 1, school.course_id, enrollment.id, 10.0),
                school.teacher_id,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, SchoolError::Validation(_)));

        storage
            .update_enrollment_impl(
                enrollment.id,
                UpdateEnrollmentRequest {
                    status: Some(EnrollmentStatus::Dropped),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let err = storage
            .create_grade_impl(
                grade_request(school.student_id, school.course_id, enrollment.id, 10.0),
                school.teacher_id,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, SchoolError::Validation(_)));

        let err = storage
            .create_grade_impl(
                grade_request(school.student_id, school.course_id, 404, 10.0),
                school.teacher_id,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, SchoolError::Validation(_)));
    }
}
