//! 教师存储操作

use std::collections::BTreeSet;

use super::{SeaOrmStorage, classify_write_error, soft_delete};
use crate::entity::prelude::{
    CourseTeachers, Departments, Schedules, Subjects, TeacherSubjectActiveModel, TeacherSubjects,
};
use crate::entity::teachers::{ActiveModel, Column, Entity as Teachers, Model};
use crate::entity::{course_teachers, departments, schedules, subjects, teacher_subjects};
use crate::errors::{Result, SchoolError};
use crate::models::{
    PaginatedResponse, PaginationInfo,
    schedules::entities::Schedule,
    subjects::entities::Subject,
    teachers::{
        entities::Teacher,
        requests::{CreateTeacherRequest, TeacherListQuery, UpdateTeacherRequest},
    },
};
use crate::utils::convert::{format_date, json_to_text};
use crate::utils::escape_like_pattern;
use crate::utils::random_code::generate_employee_id;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait, sea_query::Expr,
};

impl SeaOrmStorage {
    /// 创建教师，未提供工号时自动生成
    pub async fn create_teacher_impl(&self, req: CreateTeacherRequest) -> Result<Teacher> {
        self.ensure_live::<Departments>(req.department_id, "院系")
            .await?;

        let now = chrono::Utc::now().timestamp();
        let employee_id = req
            .employee_id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(generate_employee_id);

        let result = ActiveModel {
            employee_id: Set(employee_id),
            first_name: Set(req.first_name),
            last_name: Set(req.last_name),
            email: Set(req.email),
            phone: Set(req.phone),
            address: Set(req.address),
            gender: Set(req.gender),
            birth_date: Set(format_date(req.birth_date)),
            nationality: Set(req.nationality),
            photo: Set(req.photo),
            joining_date: Set(format_date(req.joining_date)),
            contract_type: Set(req.contract_type),
            employment_status: Set(req.employment_status.unwrap_or_else(|| "active".into())),
            qualification: Set(req.qualification),
            specialization: Set(req.specialization),
            experience_years: Set(req.experience_years),
            previous_employment: Set(req.previous_employment),
            department_id: Set(req.department_id),
            position: Set(req.position),
            salary_grade: Set(req.salary_grade),
            bank_account: Set(req.bank_account),
            tax_number: Set(req.tax_number),
            social_security_number: Set(req.social_security_number),
            emergency_contact_name: Set(req.emergency_contact_name),
            emergency_contact_phone: Set(req.emergency_contact_phone),
            additional_info: Set(json_to_text(req.additional_info.as_ref())),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| classify_write_error("创建教师", e))?;

        Ok(result.into_teacher())
    }

    /// 通过 ID 获取教师
    pub async fn get_teacher_by_id_impl(&self, id: i64) -> Result<Option<Teacher>> {
        Ok(self.find_teacher(id).await?.map(|m| m.into_teacher()))
    }

    /// 通过邮箱获取教师
    pub async fn get_teacher_by_email_impl(&self, email: &str) -> Result<Option<Teacher>> {
        let result = Teachers::find()
            .filter(Column::Email.eq(email))
            .filter(Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询教师失败: {e}")))?;

        Ok(result.map(|m| m.into_teacher()))
    }

    /// 分页列出教师
    pub async fn list_teachers_with_pagination_impl(
        &self,
        query: TeacherListQuery,
    ) -> Result<PaginatedResponse<Teacher>> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Teachers::find().filter(Column::DeletedAt.is_null());

        if let Some(department_id) = query.department_id {
            select = select.filter(Column::DepartmentId.eq(department_id));
        }
        if let Some(ref status) = query.employment_status {
            select = select.filter(Column::EmploymentStatus.eq(status.as_str()));
        }
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::FirstName.contains(&escaped))
                    .add(Column::LastName.contains(&escaped))
                    .add(Column::Email.contains(&escaped))
                    .add(Column::EmployeeId.contains(&escaped)),
            );
        }

        let paginator = select
            .order_by_asc(Column::LastName)
            .order_by_asc(Column::FirstName)
            .paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询教师总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询教师页数失败: {e}")))?;
        let teachers = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询教师列表失败: {e}")))?;

        Ok(PaginatedResponse {
            items: teachers.into_iter().map(|m| m.into_teacher()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 更新教师
    pub async fn update_teacher_impl(
        &self,
        id: i64,
        update: UpdateTeacherRequest,
    ) -> Result<Option<Teacher>> {
        if self.find_teacher(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };
        if let Some(employee_id) = update.employee_id {
            model.employee_id = Set(employee_id);
        }
        if let Some(first_name) = update.first_name {
            model.first_name = Set(first_name);
        }
        if let Some(last_name) = update.last_name {
            model.last_name = Set(last_name);
        }
        if let Some(email) = update.email {
            model.email = Set(email);
        }
        if let Some(phone) = update.phone {
            model.phone = Set(phone);
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
        if let Some(nationality) = update.nationality {
            model.nationality = Set(nationality);
        }
        if let Some(photo) = update.photo {
            model.photo = Set(Some(photo));
        }
        if let Some(joining_date) = update.joining_date {
            model.joining_date = Set(format_date(joining_date));
        }
        if let Some(contract_type) = update.contract_type {
            model.contract_type = Set(contract_type);
        }
        if let Some(employment_status) = update.employment_status {
            model.employment_status = Set(employment_status);
        }
        if let Some(qualification) = update.qualification {
            model.qualification = Set(qualification);
        }
        if let Some(specialization) = update.specialization {
            model.specialization = Set(specialization);
        }
        if let Some(experience_years) = update.experience_years {
            model.experience_years = Set(experience_years);
        }
        if let Some(previous_employment) = update.previous_employment {
            model.previous_employment = Set(Some(previous_employment));
        }
        if let Some(department_id) = update.department_id {
            self.ensure_live::<Departments>(department_id, "院系").await?;
            model.department_id = Set(department_id);
        }
        if let Some(position) = update.position {
            model.position = Set(position);
        }
        if let Some(salary_grade) = update.salary_grade {
            model.salary_grade = Set(salary_grade);
        }
        if let Some(bank_account) = update.bank_account {
            model.bank_account = Set(Some(bank_account));
        }
        if let Some(tax_number) = update.tax_number {
            model.tax_number = Set(Some(tax_number));
        }
        if let Some(ssn) = update.social_security_number {
            model.social_security_number = Set(Some(ssn));
        }
        if let Some(name) = update.emergency_contact_name {
            model.emergency_contact_name = Set(name);
        }
        if let Some(phone) = update.emergency_contact_phone {
            model.emergency_contact_phone = Set(phone);
        }
        if let Some(info) = update.additional_info {
            model.additional_info = Set(json_to_text(Some(&info)));
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| classify_write_error("更新教师", e))?;

        Ok(Some(result.into_teacher()))
    }

    /// 软删除教师，解除科目与课程关联，并清空其担任的系主任
    pub async fn delete_teacher_impl(&self, id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolError::database_operation(format!("开启事务失败: {e}")))?;

        let deleted = soft_delete::<Teachers, _>(&txn, id)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除教师失败: {e}")))?;

        if deleted {
            TeacherSubjects::delete_many()
                .filter(teacher_subjects::Column::TeacherId.eq(id))
                .exec(&txn)
                .await
                .map_err(|e| SchoolError::database_operation(format!("解除教师科目失败: {e}")))?;
            CourseTeachers::delete_many()
                .filter(course_teachers::Column::TeacherId.eq(id))
                .exec(&txn)
                .await
                .map_err(|e| SchoolError::database_operation(format!("解除教师课程失败: {e}")))?;
            Departments::update_many()
                .col_expr(
                    departments::Column::HeadTeacherId,
                    Expr::value(Option::<i64>::None),
                )
                .filter(departments::Column::HeadTeacherId.eq(id))
                .exec(&txn)
                .await
                .map_err(|e| SchoolError::database_operation(format!("清除系主任失败: {e}")))?;
        }

        txn.commit()
            .await
            .map_err(|e| SchoolError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(deleted)
    }

    /// 教师任教的科目
    pub async fn list_teacher_subjects_impl(&self, id: i64) -> Result<Vec<Subject>> {
        let subject_ids: Vec<i64> = TeacherSubjects::find()
            .filter(teacher_subjects::Column::TeacherId.eq(id))
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询教师科目失败: {e}")))?
            .into_iter()
            .map(|link| link.subject_id)
            .collect();

        let subjects = Subjects::find()
            .filter(subjects::Column::Id.is_in(subject_ids))
            .filter(subjects::Column::DeletedAt.is_null())
            .order_by_asc(subjects::Column::Code)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询科目失败: {e}")))?;

        Ok(subjects.into_iter().map(|m| m.into_subject()).collect())
    }

    /// 同步教师任教的科目
    pub async fn sync_teacher_subjects_impl(
        &self,
        id: i64,
        subject_ids: Vec<i64>,
    ) -> Result<Option<Vec<Subject>>> {
        if self.find_teacher(id).await?.is_none() {
            return Ok(None);
        }

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolError::database_operation(format!("开启事务失败: {e}")))?;

        replace_teacher_subjects(&txn, id, &subject_ids).await?;

        txn.commit()
            .await
            .map_err(|e| SchoolError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(Some(self.list_teacher_subjects_impl(id).await?))
    }

    /// 教师的课表，按星期与开始时间排序
    pub async fn list_teacher_schedules_impl(&self, id: i64) -> Result<Vec<Schedule>> {
        let rows = Schedules::find()
            .filter(schedules::Column::TeacherId.eq(id))
            .filter(schedules::Column::DeletedAt.is_null())
            .order_by_asc(schedules::Column::StartTime)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询教师课表失败: {e}")))?;

        let mut schedules: Vec<Schedule> = rows.into_iter().map(|m| m.into_schedule()).collect();
        schedules.sort_by(|a, b| {
            a.day_of_week
                .weekday_index()
                .cmp(&b.day_of_week.weekday_index())
                .then_with(|| a.start_time.cmp(&b.start_time))
        });
        Ok(schedules)
    }

    /// 教师是否任教该课程
    pub async fn is_course_teacher_impl(&self, teacher_id: i64, course_id: i64) -> Result<bool> {
        let count = CourseTeachers::find()
            .filter(course_teachers::Column::TeacherId.eq(teacher_id))
            .filter(course_teachers::Column::CourseId.eq(course_id))
            .count(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询课程教师失败: {e}")))?;

        Ok(count > 0)
    }

    async fn find_teacher(&self, id: i64) -> Result<Option<Model>> {
        Teachers::find_by_id(id)
            .filter(Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询教师失败: {e}")))
    }
}

/// 用给定科目替换教师的全部任教科目
async fn replace_teacher_subjects<C: ConnectionTrait>(
    conn: &C,
    teacher_id: i64,
    subject_ids: &[i64],
) -> Result<()> {
    let unique: BTreeSet<i64> = subject_ids.iter().copied().collect();
    let found = Subjects::find()
        .filter(subjects::Column::Id.is_in(unique.iter().copied()))
        .filter(subjects::Column::DeletedAt.is_null())
        .count(conn)
        .await
        .map_err(|e| SchoolError::database_operation(format!("查询科目失败: {e}")))?;
    if found as usize != unique.len() {
        return Err(SchoolError::validation("包含不存在的科目"));
    }

    TeacherSubjects::delete_many()
        .filter(teacher_subjects::Column::TeacherId.eq(teacher_id))
        .exec(conn)
        .await
        .map_err(|e| SchoolError::database_operation(format!("清除教师科目失败: {e}")))?;

    let now = chrono::Utc::now().timestamp();
    for subject_id in unique {
        TeacherSubjectActiveModel {
            teacher_id: Set(teacher_id),
            subject_id: Set(subject_id),
            created_at: Set(now),
        }
        .insert(conn)
        .await
        .map_err(|e| classify_write_error("分配教师科目", e))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{memory_storage, seed_school, teacher_request};
    use crate::errors::SchoolError;
    use crate::models::teachers::requests::{TeacherListQuery, UpdateTeacherRequest};

    #[tokio::test]
    async fn test_generated_employee_id_and_duplicate_email() {
        let storage = memory_storage().await;
        let school = seed_school(&storage).await;

        let teacher = storage
            .create_teacher_impl(teacher_request("awa@example.com", school.department_id))
            .await
            .unwrap();
        assert!(teacher.employee_id.starts_with("EMP"));

        let err = storage
            .create_teacher_impl(teacher_request("awa@example.com", school.department_id))
            .await
            .unwrap_err();
        assert!(matches!(err, SchoolError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_subject_sync_and_listing() {
        let storage = memory_storage().await;
        let school = seed_school(&storage).await;

        let subjects = storage
            .sync_teacher_subjects_impl(school.teacher_id, vec![school.subject_id, school.subject_id])
            .await
            .unwrap()
            .unwrap();
        assert_eq!(subjects.len(), 1);

        let cleared = storage
            .sync_teacher_subjects_impl(school.teacher_id, vec![])
            .await
            .unwrap()
            .unwrap();
        assert!(cleared.is_empty());

        assert!(
            storage
                .sync_teacher_subjects_impl(404, vec![])
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_search_and_update() {
        let storage = memory_storage().await;
        let school = seed_school(&storage).await;

        let page = storage
            .list_teachers_with_pagination_impl(TeacherListQuery {
                search: Some("teacher@".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.items.len(), 1);

        let updated = storage
            .update_teacher_impl(
                school.teacher_id,
                UpdateTeacherRequest {
                    position: Some("Chef".into()),
                    additional_info: Some(serde_json::json!({"langues": ["fr"]})),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.position, "Chef");
        assert_eq!(
            updated.additional_info,
            Some(serde_json::json!({"langues": ["fr"]}))
        );
    }

    #[tokio::test]
    async fn test_delete_clears_head_teacher() {
        let storage = memory_storage().await;
        let school = seed_school(&storage).await;
        storage
            .update_department_impl(
                school.department_id,
                crate::models::departments::requests::UpdateDepartmentRequest {
                    head_teacher_id: Some(school.teacher_id),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(storage.delete_teacher_impl(school.teacher_id).await.unwrap());
        let department = storage
            .get_department_by_id_impl(school.department_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(department.head_teacher_id, None);
        assert!(!storage.delete_teacher_impl(school.teacher_id).await.unwrap());
    }
}
