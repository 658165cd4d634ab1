//! 学生存储操作

use std::collections::HashMap;

use super::{SeaOrmStorage, classify_write_error, soft_delete};
use crate::entity::prelude::{AcademicYears, Courses, Grades};
use crate::entity::students::{ActiveModel, Column, Entity as Students};
use crate::entity::{courses, grades};
use crate::errors::{Result, SchoolError};
use crate::models::{
    PaginatedResponse, PaginationInfo,
    students::{
        entities::{Student, StudentStatus},
        requests::{CreateStudentRequest, StudentListQuery, UpdateStudentRequest},
        transcript::GradeRecord,
    },
};
use crate::utils::convert::{format_date, json_to_text};
use crate::utils::escape_like_pattern;
use crate::utils::random_code::generate_matricule;
use chrono::Datelike;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    /// 创建学生，未提供学号时按入学年份生成
    pub async fn create_student_impl(&self, req: CreateStudentRequest) -> Result<Student> {
        self.ensure_live::<AcademicYears>(req.academic_year_id, "学年")
            .await?;

        let now = chrono::Utc::now().timestamp();
        let matricule = req
            .matricule
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| generate_matricule(req.admission_date.year()));

        let result = ActiveModel {
            matricule: Set(matricule),
            first_name: Set(req.first_name),
            last_name: Set(req.last_name),
            email: Set(req.email),
            phone: Set(req.phone),
            address: Set(req.address),
            gender: Set(req.gender),
            birth_date: Set(format_date(req.birth_date)),
            birth_place: Set(req.birth_place),
            nationality: Set(req.nationality),
            photo: Set(req.photo),
            admission_date: Set(format_date(req.admission_date)),
            current_class: Set(req.current_class),
            academic_year_id: Set(req.academic_year_id),
            education_level: Set(req.education_level),
            previous_school: Set(req.previous_school),
            guardian_name: Set(req.guardian_name),
            guardian_relationship: Set(req.guardian_relationship),
            guardian_phone: Set(req.guardian_phone),
            guardian_email: Set(req.guardian_email),
            guardian_address: Set(req.guardian_address),
            guardian_occupation: Set(req.guardian_occupation),
            health_issues: Set(req.health_issues),
            blood_group: Set(req.blood_group),
            emergency_contact: Set(req.emergency_contact),
            status: Set(req.status.unwrap_or(StudentStatus::Active).to_string()),
            additional_info: Set(json_to_text(req.additional_info.as_ref())),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| classify_write_error("创建学生", e))?;

        Ok(result.into_student())
    }

    /// 通过 ID 获取学生
    pub async fn get_student_by_id_impl(&self, id: i64) -> Result<Option<Student>> {
        let result = Students::find_by_id(id)
            .filter(Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    /// 通过邮箱获取学生
    pub async fn get_student_by_email_impl(&self, email: &str) -> Result<Option<Student>> {
        let result = Students::find()
            .filter(Column::Email.eq(email))
            .filter(Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    /// 分页列出学生
    pub async fn list_students_with_pagination_impl(
        &self,
        query: StudentListQuery,
    ) -> Result<PaginatedResponse<Student>> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Students::find().filter(Column::DeletedAt.is_null());

        if let Some(academic_year_id) = query.academic_year_id {
            select = select.filter(Column::AcademicYearId.eq(academic_year_id));
        }
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }
        if let Some(ref current_class) = query.current_class {
            select = select.filter(Column::CurrentClass.eq(current_class.as_str()));
        }
        if let Some(ref education_level) = query.education_level {
            select = select.filter(Column::EducationLevel.eq(education_level.as_str()));
        }
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::FirstName.contains(&escaped))
                    .add(Column::LastName.contains(&escaped))
                    .add(Column::Matricule.contains(&escaped))
                    .add(Column::Email.contains(&escaped)),
            );
        }

        let paginator = select
            .order_by_asc(Column::LastName)
            .order_by_asc(Column::FirstName)
            .paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询学生总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询学生页数失败: {e}")))?;
        let students = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询学生列表失败: {e}")))?;

        Ok(PaginatedResponse {
            items: students.into_iter().map(|m| m.into_student()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 更新学生
    pub async fn update_student_impl(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        if self.get_student_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };
        if let Some(matricule) = update.matricule {
            model.matricule = Set(matricule);
        }
        if let Some(first_name) = update.first_name {
            model.first_name = Set(first_name);
        }
        if let Some(last_name) = update.last_name {
            model.last_name = Set(last_name);
        }
        if let Some(email) = update.email {
            model.email = Set(Some(email));
        }
        if let Some(phone) = update.phone {
            model.phone = Set(Some(phone));
        }
        if let Some(address) = update.address {
            model.address = Set(address);
        }
        if let Some(gender) = update.gender {
            model.gender = Set(gender);
        }
        if let Some(birth_date) = update.birth_date {
            model.birth_date = Set(format_date(birth_date));
        }
        if let Some(birth_place) = update.birth_place {
            model.birth_place = Set(birth_place);
        }
        if let Some(nationality) = update.nationality {
            model.nationality = Set(nationality);
        }
        if let Some(photo) = update.photo {
            model.photo = Set(Some(photo));
        }
        if let Some(admission_date) = update.admission_date {
            model.admission_date = Set(format_date(admission_date));
        }
        if let Some(current_class) = update.current_class {
            model.current_class = Set(current_class);
        }
        if let Some(academic_year_id) = update.academic_year_id {
            self.ensure_live::<AcademicYears>(academic_year_id, "学年")
                .await?;
            model.academic_year_id = Set(academic_year_id);
        }
        if let Some(education_level) = update.education_level {
            model.education_level = Set(education_level);
        }
        if let Some(previous_school) = update.previous_school {
            model.previous_school = Set(Some(previous_school));
        }
        if let Some(guardian_name) = update.guardian_name {
            model.guardian_name = Set(guardian_name);
        }
        if let Some(relationship) = update.guardian_relationship {
            model.guardian_relationship = Set(relationship);
        }
        if let Some(guardian_phone) = update.guardian_phone {
            model.guardian_phone = Set(guardian_phone);
        }
        if let Some(guardian_email) = update.guardian_email {
            model.guardian_email = Set(Some(guardian_email));
        }
        if let Some(guardian_address) = update.guardian_address {
            model.guardian_address = Set(guardian_address);
        }
        if let Some(occupation) = update.guardian_occupation {
            model.guardian_occupation = Set(occupation);
        }
        if let Some(health_issues) = update.health_issues {
            model.health_issues = Set(Some(health_issues));
        }
        if let Some(blood_group) = update.blood_group {
            model.blood_group = Set(Some(blood_group));
        }
        if let Some(emergency_contact) = update.emergency_contact {
            model.emergency_contact = Set(emergency_contact);
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }
        if let Some(info) = update.additional_info {
            model.additional_info = Set(json_to_text(Some(&info)));
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| classify_write_error("更新学生", e))?;

        Ok(Some(result.into_student()))
    }

    /// 软删除学生
    pub async fn delete_student_impl(&self, id: i64) -> Result<bool> {
        soft_delete::<Students, _>(&self.db, id)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除学生失败: {e}")))
    }

    /// 学生全部有效成绩，附带课程信息，用于成绩单
    pub async fn list_student_grade_records_impl(&self, id: i64) -> Result<Vec<GradeRecord>> {
        let grades = Grades::find()
            .filter(grades::Column::StudentId.eq(id))
            .filter(grades::Column::DeletedAt.is_null())
            .order_by_asc(grades::Column::EvaluationDate)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询学生成绩失败: {e}")))?;

        let course_ids: Vec<i64> = grades.iter().map(|g| g.course_id).collect();
        let courses: HashMap<i64, courses::Model> = Courses::find()
            .filter(courses::Column::Id.is_in(course_ids))
            .filter(courses::Column::DeletedAt.is_null())
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询课程失败: {e}")))?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();

        Ok(grades
            .into_iter()
            .filter_map(|grade| {
                let course = courses.get(&grade.course_id)?;
                Some(GradeRecord {
                    course_id: course.id,
                    course_code: course.code.clone(),
                    course_name: course.name.clone(),
                    credits: course.credits,
                    academic_year_id: grade.academic_year_id,
                    semester: course.semester.clone(),
                    grade_value: grade.grade_value,
                })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{memory_storage, seed_school, student_request};
    use crate::errors::SchoolError;
    use crate::models::students::entities::StudentStatus;
    use crate::models::students::requests::{StudentListQuery, UpdateStudentRequest};

    #[tokio::test]
    async fn test_generated_matricule() {
        let storage = memory_storage().await;
        let school = seed_school(&storage).await;

        let student = storage
            .create_student_impl(student_request(school.year_id, None))
            .await
            .unwrap();
        assert!(student.matricule.starts_with("STU2024"));
        assert_eq!(student.matricule.len(), "STU2024".len() + 6);
        assert_eq!(student.status, StudentStatus::Active);
    }

    #[tokio::test]
    async fn test_duplicate_email_conflict() {
        let storage = memory_storage().await;
        let school = seed_school(&storage).await;

        let err = storage
            .create_student_impl(student_request(school.year_id, Some("student@example.com")))
            .await
            .unwrap_err();
        assert!(matches!(err, SchoolError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_filters_and_soft_delete() {
        let storage = memory_storage().await;
        let school = seed_school(&storage).await;

        storage
            .update_student_impl(
                school.student_id,
                UpdateStudentRequest {
                    status: Some(StudentStatus::Graduated),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        let graduated = storage
            .list_students_with_pagination_impl(StudentListQuery {
                status: Some(StudentStatus::Graduated),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(graduated.pagination.total, 1);

        assert!(storage.delete_student_impl(school.student_id).await.unwrap());
        assert!(
            storage
                .get_student_by_id_impl(school.student_id)
                .await
                .unwrap()
                .is_none()
        );
        let all = storage
            .list_students_with_pagination_impl(StudentListQuery::default())
            .await
            .unwrap();
        assert_eq!(all.pagination.total, 0);
    }
}
