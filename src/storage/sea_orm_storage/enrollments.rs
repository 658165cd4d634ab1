//! 选课存储操作

use super::{SeaOrmStorage, classify_write_error, soft_delete};
use crate::entity::course_enrollments::{ActiveModel, Column, Entity as CourseEnrollments};
use crate::entity::prelude::{Courses, Payments, Students};
use crate::entity::{courses, payments, students};
use crate::errors::{Result, SchoolError};
use crate::models::{
    PaginatedResponse, PaginationInfo, RecordStatus,
    enrollments::{
        entities::{EnrollOutcome, Enrollment, EnrollmentStatus},
        requests::{CreateEnrollmentRequest, EnrollmentListQuery, UpdateEnrollmentRequest},
    },
    payments::entities::PaymentStatus,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    /// 选课
    ///
    /// 依次检查课程状态与容量、缴费（可选）、重复选课，全部在同一事务内完成。
    pub async fn create_enrollment_impl(
        &self,
        req: CreateEnrollmentRequest,
        require_payment: bool,
    ) -> Result<EnrollOutcome> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolError::database_operation(format!("开启事务失败: {e}")))?;

        let student = Students::find_by_id(req.student_id)
            .filter(students::Column::DeletedAt.is_null())
            .one(&txn)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询学生失败: {e}")))?;
        if student.is_none() {
            return Ok(EnrollOutcome::StudentNotFound);
        }

        let Some(course) = Courses::find_by_id(req.course_id)
            .filter(courses::Column::DeletedAt.is_null())
            .one(&txn)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询课程失败: {e}")))?
        else {
            return Ok(EnrollOutcome::CourseNotFound);
        };
        if course.status != RecordStatus::Active.as_str() {
            return Ok(EnrollOutcome::CourseInactive);
        }

        let enrolled = self.count_active_enrollments(&txn, course.id).await?;
        if enrolled >= course.max_students.max(0) as u64 {
            return Ok(EnrollOutcome::CourseFull);
        }

        if require_payment {
            let paid = Payments::find()
                .filter(payments::Column::StudentId.eq(req.student_id))
                .filter(payments::Column::AcademicYearId.eq(course.academic_year_id))
                .filter(payments::Column::Status.eq(PaymentStatus::Paid.as_str()))
                .filter(payments::Column::DeletedAt.is_null())
                .count(&txn)
                .await
                .map_err(|e| SchoolError::database_operation(format!("查询缴费失败: {e}")))?;
            if paid == 0 {
                return Ok(EnrollOutcome::PaymentRequired);
            }
        }

        let academic_year_id = req.academic_year_id.unwrap_or(course.academic_year_id);
        let duplicate = CourseEnrollments::find()
            .filter(Column::StudentId.eq(req.student_id))
            .filter(Column::CourseId.eq(req.course_id))
            .filter(Column::AcademicYearId.eq(academic_year_id))
            .filter(Column::Status.eq(EnrollmentStatus::Active.as_str()))
            .filter(Column::DeletedAt.is_null())
            .count(&txn)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询选课失败: {e}")))?;
        if duplicate > 0 {
            return Ok(EnrollOutcome::AlreadyEnrolled);
        }

        let now = chrono::Utc::now().timestamp();
        let enrollment = ActiveModel {
            student_id: Set(req.student_id),
            course_id: Set(req.course_id),
            academic_year_id: Set(academic_year_id),
            semester: Set(req.semester.unwrap_or(course.semester)),
            status: Set(EnrollmentStatus::Active.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| classify_write_error("创建选课", e))?;

        txn.commit()
            .await
            .map_err(|e| SchoolError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(EnrollOutcome::Enrolled(enrollment.into_enrollment()))
    }

    /// 通过 ID 获取选课记录
    pub async fn get_enrollment_by_id_impl(&self, id: i64) -> Result<Option<Enrollment>> {
        let result = CourseEnrollments::find_by_id(id)
            .filter(Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询选课失败: {e}")))?;

        Ok(result.map(|m| m.into_enrollment()))
    }

    /// 分页列出选课记录
    pub async fn list_enrollments_with_pagination_impl(
        &self,
        query: EnrollmentListQuery,
    ) -> Result<PaginatedResponse<Enrollment>> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = CourseEnrollments::find().filter(Column::DeletedAt.is_null());

        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(course_id) = query.course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }
        if let Some(academic_year_id) = query.academic_year_id {
            select = select.filter(Column::AcademicYearId.eq(academic_year_id));
        }
        if let Some(ref semester) = query.semester {
            select = select.filter(Column::Semester.eq(semester.as_str()));
        }
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        let paginator = select.order_by_desc(Column::CreatedAt).paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询选课总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询选课页数失败: {e}")))?;
        let enrollments = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询选课列表失败: {e}")))?;

        Ok(PaginatedResponse {
            items: enrollments.into_iter().map(|m| m.into_enrollment()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 更新选课学期或状态
    ///
    /// 重新激活时与选课一样检查重复选课和课程容量，拒绝结果通过 `EnrollOutcome` 返回。
    pub async fn update_enrollment_impl(
        &self,
        id: i64,
        update: UpdateEnrollmentRequest,
    ) -> Result<Option<EnrollOutcome>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolError::database_operation(format!("开启事务失败: {e}")))?;

        let Some(existing) = CourseEnrollments::find_by_id(id)
            .filter(Column::DeletedAt.is_null())
            .one(&txn)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询选课失败: {e}")))?
        else {
            return Ok(None);
        };

        let reactivating = update.status == Some(EnrollmentStatus::Active)
            && existing.status != EnrollmentStatus::Active.as_str();
        if reactivating {
            let duplicate = CourseEnrollments::find()
                .filter(Column::Id.ne(id))
                .filter(Column::StudentId.eq(existing.student_id))
                .filter(Column::CourseId.eq(existing.course_id))
                .filter(Column::AcademicYearId.eq(existing.academic_year_id))
                .filter(Column::Status.eq(EnrollmentStatus::Active.as_str()))
                .filter(Column::DeletedAt.is_null())
                .count(&txn)
                .await
                .map_err(|e| SchoolError::database_operation(format!("查询选课失败: {e}")))?;
            if duplicate > 0 {
                return Ok(Some(EnrollOutcome::AlreadyEnrolled));
            }

            let Some(course) = Courses::find_by_id(existing.course_id)
                .filter(courses::Column::DeletedAt.is_null())
                .one(&txn)
                .await
                .map_err(|e| SchoolError::database_operation(format!("查询课程失败: {e}")))?
            else {
                return Ok(Some(EnrollOutcome::CourseNotFound));
            };
            let enrolled = self.count_active_enrollments(&txn, course.id).await?;
            if enrolled >= course.max_students.max(0) as u64 {
                return Ok(Some(EnrollOutcome::CourseFull));
            }
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };
        if let Some(semester) = update.semester {
            model.semester = Set(semester);
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        let result = model
            .update(&txn)
            .await
            .map_err(|e| classify_write_error("更新选课", e))?;

        txn.commit()
            .await
            .map_err(|e| SchoolError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(Some(EnrollOutcome::Enrolled(result.into_enrollment())))
    }

    /// 软删除选课记录
    pub async fn delete_enrollment_impl(&self, id: i64) -> Result<bool> {
        soft_delete::<CourseEnrollments, _>(&self.db, id)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除选课失败: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{
        enrollment_request, memory_storage, payment_request, seed_school, student_request,
    };
    use crate::models::courses::requests::UpdateCourseRequest;
    use crate::models::enrollments::entities::{EnrollOutcome, EnrollmentStatus};
    use crate::models::enrollments::requests::UpdateEnrollmentRequest;
    use crate::models::payments::entities::PaymentStatus;
    use crate::models::RecordStatus;

    #[tokio::test]
    async fn test_enroll_defaults_from_course() {
        let storage = memory_storage().await;
        let school = seed_school(&storage).await;

        let outcome = storage
            .create_enrollment_impl(enrollment_request(school.student_id, school.course_id), false)
            .await
            .unwrap();
        let EnrollOutcome::Enrolled(enrollment) = outcome else {
            panic!("expected enrollment, got {outcome:?}");
        };
        assert_eq!(enrollment.academic_year_id, school.year_id);
        assert_eq!(enrollment.semester, "S1");
        assert_eq!(enrollment.status, EnrollmentStatus::Active);

        let again = storage
            .create_enrollment_impl(enrollment_request(school.student_id, school.course_id), false)
            .await
            .unwrap();
        assert!(matches!(again, EnrollOutcome::AlreadyEnrolled));
    }

    #[tokio::test]
    async fn test_dropped_enrollment_allows_reenroll() {
        let storage = memory_storage().await;
        let school = seed_school(&storage).await;

        let EnrollOutcome::Enrolled(first) = storage
            .create_enrollment_impl(enrollment_request(school.student_id, school.course_id), false)
            .await
            .unwrap()
        else {
            panic!("expected enrollment");
        };
        storage
            .update_enrollment_impl(
                first.id,
                UpdateEnrollmentRequest {
                    status: Some(EnrollmentStatus::Dropped),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let outcome = storage
            .create_enrollment_impl(enrollment_request(school.student_id, school.course_id), false)
            .await
            .unwrap();
        assert!(matches!(outcome, EnrollOutcome::Enrolled(_)));
    }

    #[tokio::test]
    async fn test_reactivation_rechecks_duplicate_and_capacity() {
        let storage = memory_storage().await;
        let school = seed_school(&storage).await;
        let reactivate = || UpdateEnrollmentRequest {
            status: Some(EnrollmentStatus::Active),
            ..Default::default()
        };
        let dropped = || UpdateEnrollmentRequest {
            status: Some(EnrollmentStatus::Dropped),
            ..Default::default()
        };

        let EnrollOutcome::Enrolled(first) = storage
            .create_enrollment_impl(enrollment_request(school.student_id, school.course_id), false)
            .await
            .unwrap()
        else {
            panic!("expected enrollment");
        };
        storage.update_enrollment_impl(first.id, dropped()).await.unwrap();
        let EnrollOutcome::Enrolled(second) = storage
            .create_enrollment_impl(enrollment_request(school.student_id, school.course_id), false)
            .await
            .unwrap()
        else {
            panic!("expected enrollment");
        };

        let outcome = storage
            .update_enrollment_impl(first.id, reactivate())
            .await
            .unwrap();
        assert!(matches!(outcome, Some(EnrollOutcome::AlreadyEnrolled)));
        let first_now = storage.get_enrollment_by_id_impl(first.id).await.unwrap().unwrap();
        assert_eq!(first_now.status, EnrollmentStatus::Dropped);

        // 名额被其他学生占满后不能恢复
        storage.update_enrollment_impl(second.id, dropped()).await.unwrap();
        storage
            .update_course_impl(
                school.course_id,
                UpdateCourseRequest {
                    max_students: Some(1),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let other = storage
            .create_student_impl(student_request(school.year_id, Some("other@example.com")))
            .await
            .unwrap();
        let outcome = storage
            .create_enrollment_impl(enrollment_request(other.id, school.course_id), false)
            .await
            .unwrap();
        assert!(matches!(outcome, EnrollOutcome::Enrolled(_)));

        let outcome = storage
            .update_enrollment_impl(first.id, reactivate())
            .await
            .unwrap();
        assert!(matches!(outcome, Some(EnrollOutcome::CourseFull)));

        // 已是 active 的记录只改学期时不受容量影响
        let outcome = storage
            .update_enrollment_impl(
                second.id,
                UpdateEnrollmentRequest {
                    semester: Some("S2".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let updated = match outcome {
            Some(EnrollOutcome::Enrolled(updated)) => updated,
            other => panic!("expected update, got {other:?}"),
        };
        assert_eq!(updated.semester, "S2");
        assert_eq!(updated.status, EnrollmentStatus::Dropped);

        assert!(
            storage
                .update_enrollment_impl(9999, reactivate())
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_capacity_and_inactive_course() {
        let storage = memory_storage().await;
        let school = seed_school(&storage).await;
        storage
            .update_course_impl(
                school.course_id,
                UpdateCourseRequest {
                    max_students: Some(1),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let outcome = storage
            .create_enrollment_impl(enrollment_request(school.student_id, school.course_id), false)
            .await
            .unwrap();
        assert!(matches!(outcome, EnrollOutcome::Enrolled(_)));

        let other = storage
            .create_student_impl(student_request(school.year_id, Some("other@example.com")))
            .await
            .unwrap();
        let outcome = storage
            .create_enrollment_impl(enrollment_request(other.id, school.course_id), false)
            .await
            .unwrap();
        assert!(matches!(outcome, EnrollOutcome::CourseFull));

        storage
            .update_course_impl(
                school.course_id,
                UpdateCourseRequest {
                    status: Some(RecordStatus::Inactive),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let outcome = storage
            .create_enrollment_impl(enrollment_request(other.id, school.course_id), false)
            .await
            .unwrap();
        assert!(matches!(outcome, EnrollOutcome::CourseInactive));
    }

    #[tokio::test]
    async fn test_payment_requirement() {
        let storage = memory_storage().await;
        let school = seed_school(&storage).await;

        let outcome = storage
            .create_enrollment_impl(enrollment_request(school.student_id, school.course_id), true)
            .await
            .unwrap();
        assert!(matches!(outcome, EnrollOutcome::PaymentRequired));

        let mut payment = payment_request(school.student_id, school.year_id);
        payment.status = Some(PaymentStatus::Paid);
        storage.create_payment_impl(payment).await.unwrap();

        let outcome = storage
            .create_enrollment_impl(enrollment_request(school.student_id, school.course_id), true)
            .await
            .unwrap();
        assert!(matches!(outcome, EnrollOutcome::Enrolled(_)));
    }

    #[tokio::test]
    async fn test_missing_references() {
        let storage = memory_storage().await;
        let school = seed_school(&storage).await;

        let outcome = storage
            .create_enrollment_impl(enrollment_request(404, school.course_id), false)
            .await
            .unwrap();
        assert!(matches!(outcome, EnrollOutcome::StudentNotFound));

        let outcome = storage
            .create_enrollment_impl(enrollment_request(school.student_id, 404), false)
            .await
            .unwrap();
        assert!(matches!(outcome, EnrollOutcome::CourseNotFound));
    }
}
