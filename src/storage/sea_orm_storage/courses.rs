//! 课程存储操作

use std::collections::BTreeSet;

use super::{SeaOrmStorage, classify_write_error, soft_delete};
use crate::entity::courses::{ActiveModel, Column, Entity as Courses, Model};
use crate::entity::prelude::{
    AcademicYears, CourseEnrollments, CourseTeacherActiveModel, CourseTeachers, Departments,
    Subjects, Teachers,
};
use crate::entity::{course_enrollments, course_teachers, subjects, teachers};
use crate::errors::{Result, SchoolError};
use crate::models::{
    PaginatedResponse, PaginationInfo, RecordStatus,
    courses::{
        entities::{Course, CourseDetail},
        requests::{CourseListQuery, CreateCourseRequest, UpdateCourseRequest},
    },
    enrollments::entities::EnrollmentStatus,
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建课程并分配教师
    pub async fn create_course_impl(&self, req: CreateCourseRequest) -> Result<CourseDetail> {
        self.ensure_subject_in_department(req.subject_id, req.department_id)
            .await?;
        self.ensure_live::<AcademicYears>(req.academic_year_id, "学年")
            .await?;

        let now = chrono::Utc::now().timestamp();
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolError::database_operation(format!("开启事务失败: {e}")))?;

        let course = ActiveModel {
            code: Set(req.code),
            name: Set(req.name),
            subject_id: Set(req.subject_id),
            department_id: Set(req.department_id),
            academic_year_id: Set(req.academic_year_id),
            description: Set(req.description),
            credits: Set(req.credits),
            hours_per_week: Set(req.hours_per_week),
            course_type: Set(req.course_type),
            education_level: Set(req.education_level),
            semester: Set(req.semester),
            max_students: Set(req.max_students),
            prerequisites: Set(prerequisites_text(req.prerequisites.as_deref())),
            syllabus: Set(req.syllabus),
            objectives: Set(req.objectives),
            assessment_method: Set(req.assessment_method),
            status: Set(req.status.unwrap_or(RecordStatus::Active).to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| classify_write_error("创建课程", e))?;

        replace_course_teachers(&txn, course.id, &req.teacher_ids).await?;

        txn.commit()
            .await
            .map_err(|e| SchoolError::database_operation(format!("提交事务失败: {e}")))?;

        self.load_course_detail(course).await
    }

    /// 通过 ID 获取课程
    pub async fn get_course_by_id_impl(&self, id: i64) -> Result<Option<Course>> {
        Ok(self.find_course(id).await?.map(|m| m.into_course()))
    }

    /// 获取课程详情
    pub async fn get_course_detail_impl(&self, id: i64) -> Result<Option<CourseDetail>> {
        match self.find_course(id).await? {
            Some(model) => Ok(Some(self.load_course_detail(model).await?)),
            None => Ok(None),
        }
    }

    /// 分页列出课程
    pub async fn list_courses_with_pagination_impl(
        &self,
        query: CourseListQuery,
    ) -> Result<PaginatedResponse<Course>> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Courses::find().filter(Column::DeletedAt.is_null());

        if let Some(department_id) = query.department_id {
            select = select.filter(Column::DepartmentId.eq(department_id));
        }
        if let Some(subject_id) = query.subject_id {
            select = select.filter(Column::SubjectId.eq(subject_id));
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
            .map_err(|e| SchoolError::database_operation(format!("查询课程总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询课程页数失败: {e}")))?;
        let courses = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询课程列表失败: {e}")))?;

        Ok(PaginatedResponse {
            items: courses.into_iter().map(|m| m.into_course()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 更新课程，科目与院系变动时重新校验归属
    pub async fn update_course_impl(
        &self,
        id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<CourseDetail>> {
        let Some(existing) = self.find_course(id).await? else {
            return Ok(None);
        };

        if update.subject_id.is_some() || update.department_id.is_some() {
            self.ensure_subject_in_department(
                update.subject_id.unwrap_or(existing.subject_id),
                update.department_id.unwrap_or(existing.department_id),
            )
            .await?;
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };
        if let Some(code) = update.code {
            model.code = Set(code);
        }
        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(subject_id) = update.subject_id {
            model.subject_id = Set(subject_id);
        }
        if let Some(department_id) = update.department_id {
            model.department_id = Set(department_id);
        }
        if let Some(academic_year_id) = update.academic_year_id {
            self.ensure_live::<AcademicYears>(academic_year_id, "学年")
                .await?;
            model.academic_year_id = Set(academic_year_id);
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(credits) = update.credits {
            model.credits = Set(credits);
        }
        if let Some(hours) = update.hours_per_week {
            model.hours_per_week = Set(hours);
        }
        if let Some(course_type) = update.course_type {
            model.course_type = Set(course_type);
        }
        if let Some(education_level) = update.education_level {
            model.education_level = Set(education_level);
        }
        if let Some(semester) = update.semester {
            model.semester = Set(semester);
        }
        if let Some(max_students) = update.max_students {
            model.max_students = Set(max_students);
        }
        if let Some(prerequisites) = update.prerequisites {
            model.prerequisites = Set(prerequisites_text(Some(&prerequisites)));
        }
        if let Some(syllabus) = update.syllabus {
            model.syllabus = Set(Some(syllabus));
        }
        if let Some(objectives) = update.objectives {
            model.objectives = Set(Some(objectives));
        }
        if let Some(method) = update.assessment_method {
            model.assessment_method = Set(method);
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| classify_write_error("更新课程", e))?;

        Ok(Some(self.load_course_detail(result).await?))
    }

    /// 同步课程的任课教师
    pub async fn sync_course_teachers_impl(
        &self,
        id: i64,
        teacher_ids: Vec<i64>,
    ) -> Result<Option<CourseDetail>> {
        let Some(model) = self.find_course(id).await? else {
            return Ok(None);
        };

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolError::database_operation(format!("开启事务失败: {e}")))?;

        replace_course_teachers(&txn, id, &teacher_ids).await?;

        txn.commit()
            .await
            .map_err(|e| SchoolError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(Some(self.load_course_detail(model).await?))
    }

    /// 软删除课程并解除教师关联
    pub async fn delete_course_impl(&self, id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolError::database_operation(format!("开启事务失败: {e}")))?;

        let deleted = soft_delete::<Courses, _>(&txn, id)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除课程失败: {e}")))?;
        if deleted {
            CourseTeachers::delete_many()
                .filter(course_teachers::Column::CourseId.eq(id))
                .exec(&txn)
                .await
                .map_err(|e| SchoolError::database_operation(format!("解除课程教师失败: {e}")))?;
        }

        txn.commit()
            .await
            .map_err(|e| SchoolError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(deleted)
    }

    pub(crate) async fn find_course(&self, id: i64) -> Result<Option<Model>> {
        Courses::find_by_id(id)
            .filter(Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询课程失败: {e}")))
    }

    /// 科目必须存在且属于该院系
    async fn ensure_subject_in_department(&self, subject_id: i64, department_id: i64) -> Result<()> {
        self.ensure_live::<Departments>(department_id, "院系")
            .await?;
        let subject = Subjects::find_by_id(subject_id)
            .filter(subjects::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询科目失败: {e}")))?
            .ok_or_else(|| SchoolError::validation(format!("科目 {subject_id} 不存在")))?;

        if subject.department_id != department_id {
            return Err(SchoolError::validation("科目不属于该院系"));
        }
        Ok(())
    }

    async fn load_course_detail(&self, model: Model) -> Result<CourseDetail> {
        let teacher_ids: Vec<i64> = CourseTeachers::find()
            .filter(course_teachers::Column::CourseId.eq(model.id))
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询课程教师失败: {e}")))?
            .into_iter()
            .map(|link| link.teacher_id)
            .collect();
        let active_enrollments = self.count_active_enrollments(&self.db, model.id).await?;

        Ok(CourseDetail {
            course: model.into_course(),
            teachers: self.teacher_summaries(teacher_ids).await?,
            active_enrollments: active_enrollments as i64,
        })
    }

    /// 课程的有效选课人数
    pub(crate) async fn count_active_enrollments<C: ConnectionTrait>(
        &self,
        conn: &C,
        course_id: i64,
    ) -> Result<u64> {
        CourseEnrollments::find()
            .filter(course_enrollments::Column::CourseId.eq(course_id))
            .filter(course_enrollments::Column::Status.eq(EnrollmentStatus::Active.as_str()))
            .filter(course_enrollments::Column::DeletedAt.is_null())
            .count(conn)
            .await
            .map_err(|e| SchoolError::database_operation(format!("统计选课人数失败: {e}")))
    }
}

fn prerequisites_text(codes: Option<&[String]>) -> Option<String> {
    codes.and_then(|codes| serde_json::to_string(codes).ok())
}

/// 用给定教师替换课程的全部任课教师
async fn replace_course_teachers<C: ConnectionTrait>(
    conn: &C,
    course_id: i64,
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

    CourseTeachers::delete_many()
        .filter(course_teachers::Column::CourseId.eq(course_id))
        .exec(conn)
        .await
        .map_err(|e| SchoolError::database_operation(format!("清除课程教师失败: {e}")))?;

    let now = chrono::Utc::now().timestamp();
    for teacher_id in unique {
        CourseTeacherActiveModel {
            course_id: Set(course_id),
            teacher_id: Set(teacher_id),
            created_at: Set(now),
        }
        .insert(conn)
        .await
        .map_err(|e| classify_write_error("分配课程教师", e))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{course_request, memory_storage, seed_school};
    use crate::errors::SchoolError;
    use crate::models::courses::requests::UpdateCourseRequest;
    use crate::models::departments::requests::CreateDepartmentRequest;

    #[tokio::test]
    async fn test_subject_must_belong_to_department() {
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

        let mut req = course_request("PHY-101", &school);
        req.department_id = other.id;
        let err = storage.create_course_impl(req).await.unwrap_err();
        assert!(matches!(err, SchoolError::Validation(_)));

        let err = storage
            .update_course_impl(
                school.course_id,
                UpdateCourseRequest {
                    department_id: Some(other.id),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, SchoolError::Validation(_)));
    }

    #[tokio::test]
    async fn test_detail_with_teachers_and_prerequisites() {
        let storage = memory_storage().await;
        let school = seed_school(&storage).await;

        let mut req = course_request("MATH-201", &school);
        req.prerequisites = Some(vec!["MATH-101".into()]);
        req.teacher_ids = vec![school.teacher_id];
        let detail = storage.create_course_impl(req).await.unwrap();

        assert_eq!(detail.teachers.len(), 1);
        assert_eq!(detail.active_enrollments, 0);
        assert_eq!(detail.course.prerequisites, Some(vec!["MATH-101".to_string()]));
        assert!(
            storage
                .is_course_teacher_impl(school.teacher_id, detail.course.id)
                .await
                .unwrap()
        );

        assert!(storage.delete_course_impl(detail.course.id).await.unwrap());
        assert!(
            !storage
                .is_course_teacher_impl(school.teacher_id, detail.course.id)
                .await
                .unwrap()
        );
    }
}
