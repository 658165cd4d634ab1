//! 教师实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "teachers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub employee_id: String,
    pub first_name: String,
    pub last_name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub phone: String,
    #[sea_orm(column_type = "Text")]
    pub address: String,
    pub gender: String,
    pub birth_date: String,
    pub nationality: String,
    pub photo: Option<String>,
    pub joining_date: String,
    pub contract_type: String,
    pub employment_status: String,
    pub qualification: String,
    pub specialization: String,
    pub experience_years: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub previous_employment: Option<String>,
    pub department_id: i64,
    pub position: String,
    pub salary_grade: String,
    pub bank_account: Option<String>,
    pub tax_number: Option<String>,
    pub social_security_number: Option<String>,
    pub emergency_contact_name: String,
    pub emergency_contact_phone: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub additional_info: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
    pub deleted_at: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::departments::Entity",
        from = "Column::DepartmentId",
        to = "super::departments::Column::Id"
    )]
    Department,
    #[sea_orm(has_many = "super::teacher_subjects::Entity")]
    TeacherSubjects,
    #[sea_orm(has_many = "super::course_teachers::Entity")]
    CourseTeachers,
}

impl Related<super::departments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

impl Related<super::teacher_subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TeacherSubjects.def()
    }
}

impl Related<super::course_teachers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseTeachers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_teacher(self) -> crate::models::teachers::entities::Teacher {
        use crate::utils::convert::{parse_json_text, parse_stored_date, timestamp_to_datetime};

        crate::models::teachers::entities::Teacher {
            id: self.id,
            employee_id: self.employee_id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            address: self.address,
            gender: self.gender,
            birth_date: parse_stored_date(&self.birth_date),
            nationality: self.nationality,
            photo: self.photo,
            joining_date: parse_stored_date(&self.joining_date),
            contract_type: self.contract_type,
            employment_status: self.employment_status,
            qualification: self.qualification,
            specialization: self.specialization,
            experience_years: self.experience_years,
            previous_employment: self.previous_employment,
            department_id: self.department_id,
            position: self.position,
            salary_grade: self.salary_grade,
            bank_account: self.bank_account,
            tax_number: self.tax_number,
            social_security_number: self.social_security_number,
            emergency_contact_name: self.emergency_contact_name,
            emergency_contact_phone: self.emergency_contact_phone,
            additional_info: parse_json_text(self.additional_info.as_deref()),
            created_at: timestamp_to_datetime(self.created_at),
            updated_at: timestamp_to_datetime(self.updated_at),
        }
    }

    pub fn into_summary(self) -> crate::models::teachers::entities::TeacherSummary {
        crate::models::teachers::entities::TeacherSummary {
            id: self.id,
            employee_id: self.employee_id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
        }
    }
}
