//! 报表存储操作

use std::collections::HashMap;

use super::{SeaOrmStorage, classify_write_error, soft_delete};
use crate::entity::prelude::{
    AcademicYears, CourseEnrollments, Courses, Departments, Grades, Payments, Students, Teachers,
    Users,
};
use crate::entity::reports::{ActiveModel, Column, Entity as Reports, Model};
use crate::entity::{
    academic_years, course_enrollments, courses, departments, grades, payments, students,
    teachers, users,
};
use crate::errors::{Result, SchoolError};
use crate::models::{
    PaginatedResponse, PaginationInfo,
    reports::{
        dataset::{
            CourseRow, DepartmentRow, EnrollmentRow, GradeRow, PaymentRow, ReportDataset,
            StudentRow,
        },
        entities::{Report, ReportGenerator, ReportStatus, ReportWithRelations},
        requests::{CreateReportRequest, ReportListQuery},
    },
};
use crate::utils::convert::json_to_text;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 以 pending 状态保存报表
    pub async fn create_report_impl(
        &self,
        req: CreateReportRequest,
        generated_by: i64,
    ) -> Result<Report> {
        self.ensure_live::<AcademicYears>(req.academic_year_id, "学年")
            .await?;

        let now = chrono::Utc::now().timestamp();
        let result = ActiveModel {
            title: Set(req.title),
            report_type: Set(req.report_type.to_string()),
            academic_year_id: Set(req.academic_year_id),
            semester: Set(req.semester),
            parameters: Set(json_to_text(req.parameters.as_ref())),
            generated_by: Set(generated_by),
            file_path: Set(None),
            status: Set(ReportStatus::Pending.to_string()),
            error_message: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| classify_write_error("创建报表", e))?;

        Ok(result.into_report())
    }

    /// 获取报表及其学年与生成人
    pub async fn get_report_by_id_impl(&self, id: i64) -> Result<Option<ReportWithRelations>> {
        let report = Reports::find_by_id(id)
            .filter(Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询报表失败: {e}")))?;

        match report {
            Some(model) => Ok(self.attach_relations(vec![model]).await?.pop()),
            None => Ok(None),
        }
    }

    /// 分页列出报表，按创建时间倒序
    pub async fn list_reports_with_pagination_impl(
        &self,
        query: ReportListQuery,
    ) -> Result<PaginatedResponse<ReportWithRelations>> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Reports::find().filter(Column::DeletedAt.is_null());

        if let Some(academic_year_id) = query.academic_year_id {
            select = select.filter(Column::AcademicYearId.eq(academic_year_id));
        }
        if let Some(report_type) = query.report_type {
            select = select.filter(Column::ReportType.eq(report_type.to_string()));
        }
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        let paginator = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询报表总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询报表页数失败: {e}")))?;
        let reports = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询报表列表失败: {e}")))?;

        Ok(PaginatedResponse {
            items: self.attach_relations(reports).await?,
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 更新报表生成状态
    pub async fn update_report_status_impl(
        &self,
        id: i64,
        status: ReportStatus,
        file_path: Option<String>,
        error_message: Option<String>,
    ) -> Result<bool> {
        let exists = Reports::find_by_id(id)
            .filter(Column::DeletedAt.is_null())
            .count(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询报表失败: {e}")))?;
        if exists == 0 {
            return Ok(false);
        }

        let mut model = ActiveModel {
            id: Set(id),
            status: Set(status.to_string()),
            error_message: Set(error_message),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };
        if file_path.is_some() {
            model.file_path = Set(file_path);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("更新报表状态失败: {e}")))?;

        Ok(true)
    }

    /// 软删除报表
    pub async fn delete_report_impl(&self, id: i64) -> Result<bool> {
        soft_delete::<Reports, _>(&self.db, id)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除报表失败: {e}")))
    }

    /// 尚未完成的报表，启动时重新入队
    pub async fn list_pending_report_ids_impl(&self) -> Result<Vec<i64>> {
        let reports = Reports::find()
            .filter(
                Column::Status.is_in([
                    ReportStatus::Pending.as_str(),
                    ReportStatus::Processing.as_str(),
                ]),
            )
            .filter(Column::DeletedAt.is_null())
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询待生成报表失败: {e}")))?;

        Ok(reports.into_iter().map(|r| r.id).collect())
    }

    /// 读取生成报表所需的数据
    pub async fn collect_report_dataset_impl(
        &self,
        academic_year_id: i64,
        semester: Option<String>,
    ) -> Result<ReportDataset> {
        let year = AcademicYears::find_by_id(academic_year_id)
            .filter(academic_years::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询学年失败: {e}")))?
            .ok_or_else(|| SchoolError::not_found(format!("学年 {academic_year_id} 不存在")))?;

        let mut course_query = Courses::find()
            .filter(courses::Column::AcademicYearId.eq(academic_year_id))
            .filter(courses::Column::DeletedAt.is_null());
        if let Some(ref semester) = semester {
            course_query = course_query.filter(courses::Column::Semester.eq(semester.as_str()));
        }
        let course_models = course_query
            .order_by_asc(courses::Column::Code)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询课程失败: {e}")))?;
        let course_ids: Vec<i64> = course_models.iter().map(|c| c.id).collect();

        let student_models = Students::find()
            .filter(students::Column::AcademicYearId.eq(academic_year_id))
            .filter(students::Column::DeletedAt.is_null())
            .order_by_asc(students::Column::LastName)
            .order_by_asc(students::Column::FirstName)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询学生失败: {e}")))?;

        let enrollment_models = CourseEnrollments::find()
            .filter(course_enrollments::Column::CourseId.is_in(course_ids.clone()))
            .filter(course_enrollments::Column::DeletedAt.is_null())
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询选课失败: {e}")))?;

        let grade_models = Grades::find()
            .filter(grades::Column::CourseId.is_in(course_ids))
            .filter(grades::Column::AcademicYearId.eq(academic_year_id))
            .filter(grades::Column::DeletedAt.is_null())
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询成绩失败: {e}")))?;

        let mut payment_query = Payments::find()
            .filter(payments::Column::AcademicYearId.eq(academic_year_id))
            .filter(payments::Column::DeletedAt.is_null());
        if let Some(ref semester) = semester {
            payment_query = payment_query.filter(payments::Column::Semester.eq(semester.as_str()));
        }
        let payment_models = payment_query
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询缴费失败: {e}")))?;

        let department_models = Departments::find()
            .filter(departments::Column::DeletedAt.is_null())
            .order_by_asc(departments::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询院系失败: {e}")))?;
        let mut teacher_counts: HashMap<i64, i64> = HashMap::new();
        for teacher in Teachers::find()
            .filter(teachers::Column::DeletedAt.is_null())
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询教师失败: {e}")))?
        {
            *teacher_counts.entry(teacher.department_id).or_default() += 1;
        }

        Ok(ReportDataset {
            academic_year: year.year,
            semester,
            courses: course_models
                .into_iter()
                .map(|c| CourseRow {
                    id: c.id,
                    code: c.code,
                    name: c.name,
                })
                .collect(),
            students: student_models
                .into_iter()
                .map(|s| StudentRow {
                    id: s.id,
                    matricule: s.matricule,
                    name: format!("{} {}", s.first_name, s.last_name),
                    status: s.status,
                    gender: s.gender,
                    education_level: s.education_level,
                })
                .collect(),
            enrollments: enrollment_models
                .into_iter()
                .map(|e| EnrollmentRow {
                    student_id: e.student_id,
                    course_id: e.course_id,
                    status: e.status,
                })
                .collect(),
            grades: grade_models
                .into_iter()
                .map(|g| GradeRow {
                    student_id: g.student_id,
                    course_id: g.course_id,
                    grade_value: g.grade_value,
                })
                .collect(),
            payments: payment_models
                .into_iter()
                .map(|p| PaymentRow {
                    student_id: p.student_id,
                    amount_cents: p.amount_cents,
                    status: p.status,
                    payment_type: p.payment_type,
                })
                .collect(),
            departments: department_models
                .into_iter()
                .map(|d| DepartmentRow {
                    teacher_count: teacher_counts.get(&d.id).copied().unwrap_or(0),
                    name: d.name,
                })
                .collect(),
        })
    }

    /// 批量附加学年与生成人
    async fn attach_relations(&self, reports: Vec<Model>) -> Result<Vec<ReportWithRelations>> {
        let year_ids: Vec<i64> = reports.iter().map(|r| r.academic_year_id).collect();
        let user_ids: Vec<i64> = reports.iter().map(|r| r.generated_by).collect();

        let years: HashMap<i64, _> = AcademicYears::find()
            .filter(academic_years::Column::Id.is_in(year_ids))
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询学年失败: {e}")))?
            .into_iter()
            .map(|y| (y.id, y.into_academic_year()))
            .collect();
        let generators: HashMap<i64, ReportGenerator> = Users::find()
            .filter(users::Column::Id.is_in(user_ids))
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询用户失败: {e}")))?
            .into_iter()
            .map(|u| {
                (
                    u.id,
                    ReportGenerator {
                        id: u.id,
                        name: format!("{} {}", u.first_name, u.last_name),
                        email: u.email,
                    },
                )
            })
            .collect();

        Ok(reports
            .into_iter()
            .map(|model| ReportWithRelations {
                academic_year: years.get(&model.academic_year_id).cloned(),
                generator: generators.get(&model.generated_by).cloned(),
                report: model.into_report(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{
        enrollment_request, grade_request, memory_storage, payment_request, seed_school,
        user_request,
    };
    use crate::models::enrollments::entities::EnrollOutcome;
    use crate::models::reports::entities::{ReportStatus, ReportType};
    use crate::models::reports::requests::{CreateReportRequest, ReportListQuery};

    fn report_request(year_id: i64) -> CreateReportRequest {
        CreateReportRequest {
            title: "Bilan".into(),
            report_type: ReportType::Academic,
            academic_year_id: year_id,
            semester: None,
            parameters: Some(serde_json::json!({"detail": true})),
        }
    }

    #[tokio::test]
    async fn test_report_lifecycle() {
        let storage = memory_storage().await;
        let school = seed_school(&storage).await;
        let admin = storage
            .create_user_impl(user_request("admin@example.com", &[]))
            .await
            .unwrap();

        let report = storage
            .create_report_impl(report_request(school.year_id), admin.id)
            .await
            .unwrap();
        assert_eq!(report.status, ReportStatus::Pending);
        assert_eq!(
            storage.list_pending_report_ids_impl().await.unwrap(),
            vec![report.id]
        );

        assert!(
            storage
                .update_report_status_impl(report.id, ReportStatus::Processing, None, None)
                .await
                .unwrap()
        );
        assert!(
            storage
                .update_report_status_impl(
                    report.id,
                    ReportStatus::Generated,
                    Some("report_1.xlsx".into()),
                    None,
                )
                .await
                .unwrap()
        );
        assert!(storage.list_pending_report_ids_impl().await.unwrap().is_empty());

        let loaded = storage.get_report_by_id_impl(report.id).await.unwrap().unwrap();
        assert_eq!(loaded.report.status, ReportStatus::Generated);
        assert_eq!(loaded.report.file_path.as_deref(), Some("report_1.xlsx"));
        assert_eq!(loaded.academic_year.unwrap().id, school.year_id);
        assert_eq!(loaded.generator.unwrap().email, "admin@example.com");

        let page = storage
            .list_reports_with_pagination_impl(ReportListQuery {
                status: Some(ReportStatus::Failed),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(page.items.is_empty());

        assert!(storage.delete_report_impl(report.id).await.unwrap());
        assert!(!storage
            .update_report_status_impl(report.id, ReportStatus::Failed, None, None)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_collect_dataset() {
        let storage = memory_storage().await;
        let school = seed_school(&storage).await;
        let EnrollOutcome::Enrolled(enrollment) = storage
            .create_enrollment_impl(enrollment_request(school.student_id, school.course_id), false)
            .await
            .unwrap()
        else {
            panic!("expected enrollment");
        };
        storage
            .create_grade_impl(
                grade_request(school.student_id, school.course_id, enrollment.id, 15.0),
                school.teacher_id,
            )
            .await
            .unwrap();
        storage
            .create_payment_impl(payment_request(school.student_id, school.year_id))
            .await
            .unwrap();

        let dataset = storage
            .collect_report_dataset_impl(school.year_id, None)
            .await
            .unwrap();
        assert_eq!(dataset.academic_year, "2024-2025");
        assert_eq!(dataset.courses.len(), 1);
        assert_eq!(dataset.students.len(), 1);
        assert_eq!(dataset.enrollments.len(), 1);
        assert_eq!(dataset.grades.len(), 1);
        assert_eq!(dataset.payments.len(), 1);
        assert_eq!(dataset.departments[0].teacher_count, 1);

        let filtered = storage
            .collect_report_dataset_impl(school.year_id, Some("S2".into()))
            .await
            .unwrap();
        assert!(filtered.courses.is_empty());
        assert!(filtered.grades.is_empty());
    }
}
