//! 仪表盘统计

use super::SeaOrmStorage;
use crate::entity::prelude::{CourseEnrollments, Courses, Payments, Students, Teachers};
use crate::entity::{course_enrollments, courses, payments, students, teachers};
use crate::errors::{Result, SchoolError};
use crate::models::{
    RecordStatus, dashboard::responses::DashboardStats,
    enrollments::entities::EnrollmentStatus, payments::entities::PaymentStatus,
    students::entities::StudentStatus,
};
use crate::utils::money::from_cents;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

impl SeaOrmStorage {
    /// 汇总仪表盘数据，缴费合计限定为当前学年
    pub async fn get_dashboard_stats_impl(&self) -> Result<DashboardStats> {
        let current = self.get_current_academic_year_impl().await?;

        let active_students = Students::find()
            .filter(students::Column::Status.eq(StudentStatus::Active.as_str()))
            .filter(students::Column::DeletedAt.is_null())
            .count(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("统计学生失败: {e}")))?;
        let teachers = Teachers::find()
            .filter(teachers::Column::DeletedAt.is_null())
            .count(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("统计教师失败: {e}")))?;
        let active_courses = Courses::find()
            .filter(courses::Column::Status.eq(RecordStatus::Active.as_str()))
            .filter(courses::Column::DeletedAt.is_null())
            .count(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("统计课程失败: {e}")))?;
        let active_enrollments = CourseEnrollments::find()
            .filter(course_enrollments::Column::Status.eq(EnrollmentStatus::Active.as_str()))
            .filter(course_enrollments::Column::DeletedAt.is_null())
            .count(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("统计选课失败: {e}")))?;

        let (mut paid_cents, mut pending_cents) = (0i64, 0i64);
        if let Some(ref year) = current {
            let rows = Payments::find()
                .filter(payments::Column::AcademicYearId.eq(year.id))
                .filter(payments::Column::DeletedAt.is_null())
                .all(&self.db)
                .await
                .map_err(|e| SchoolError::database_operation(format!("统计缴费失败: {e}")))?;
            for row in rows {
                if row.status == PaymentStatus::Paid.as_str() {
                    paid_cents += row.amount_cents;
                } else if row.status == PaymentStatus::Pending.as_str() {
                    pending_cents += row.amount_cents;
                }
            }
        }

        Ok(DashboardStats {
            current_academic_year: current,
            active_students: active_students as i64,
            teachers: teachers as i64,
            active_courses: active_courses as i64,
            active_enrollments: active_enrollments as i64,
            paid_total: from_cents(paid_cents),
            pending_total: from_cents(pending_cents),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{memory_storage, payment_request, seed_school};
    use crate::models::payments::entities::PaymentStatus;

    #[tokio::test]
    async fn test_dashboard_counts_current_year() {
        let storage = memory_storage().await;
        let empty = storage.get_dashboard_stats_impl().await.unwrap();
        assert!(empty.current_academic_year.is_none());
        assert_eq!(empty.active_students, 0);

        let school = seed_school(&storage).await;
        let mut paid = payment_request(school.student_id, school.year_id);
        paid.status = Some(PaymentStatus::Paid);
        storage.create_payment_impl(paid).await.unwrap();
        storage
            .create_payment_impl(payment_request(school.student_id, school.year_id))
            .await
            .unwrap();

        let stats = storage.get_dashboard_stats_impl().await.unwrap();
        assert_eq!(stats.current_academic_year.unwrap().id, school.year_id);
        assert_eq!(stats.active_students, 1);
        assert_eq!(stats.teachers, 1);
        assert_eq!(stats.active_courses, 1);
        assert_eq!(stats.paid_total, 250.0);
        assert_eq!(stats.pending_total, 250.0);
    }
}
