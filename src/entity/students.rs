//! 学生实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub matricule: String,
    pub first_name: String,
    pub last_name: String,
    #[sea_orm(unique)]
    pub email: Option<String>,
    pub phone: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub address: String,
    pub gender: String,
    pub birth_date: String,
    pub birth_place: String,
    pub nationality: String,
    pub photo: Option<String>,
    pub admission_date: String,
    pub current_class: String,
    pub academic_year_id: i64,
    pub education_level: String,
    pub previous_school: Option<String>,
    pub guardian_name: String,
    pub guardian_relationship: String,
    pub guardian_phone: String,
    pub guardian_email: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub guardian_address: String,
    pub guardian_occupation: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub health_issues: Option<String>,
    pub blood_group: Option<String>,
    pub emergency_contact: String,
    pub status: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub additional_info: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
    pub deleted_at: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::academic_years::Entity",
        from = "Column::AcademicYearId",
        to = "super::academic_years::Column::Id"
    )]
    AcademicYear,
    #[sea_orm(has_many = "super::course_enrollments::Entity")]
    Enrollments,
    #[sea_orm(has_many = "super::grades::Entity")]
    Grades,
    #[sea_orm(has_many = "super::payments::Entity")]
    Payments,
}

impl Related<super::academic_years::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AcademicYear.def()
    }
}

impl Related<super::course_enrollments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enrollments.def()
    }
}

impl Related<super::grades::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Grades.def()
    }
}

impl Related<super::payments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_student(self) -> crate::models::students::entities::Student {
        use crate::models::students::entities::{Student, StudentStatus};
        use crate::utils::convert::{parse_json_text, parse_stored_date, timestamp_to_datetime};

        Student {
            id: self.id,
            matricule: self.matricule,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            address: self.address,
            gender: self.gender,
            birth_date: parse_stored_date(&self.birth_date),
            birth_place: self.birth_place,
            nationality: self.nationality,
            photo: self.photo,
            admission_date: parse_stored_date(&self.admission_date),
            current_class: self.current_class,
            academic_year_id: self.academic_year_id,
            education_level: self.education_level,
            previous_school: self.previous_school,
            guardian_name: self.guardian_name,
            guardian_relationship: self.guardian_relationship,
            guardian_phone: self.guardian_phone,
            guardian_email: self.guardian_email,
            guardian_address: self.guardian_address,
            guardian_occupation: self.guardian_occupation,
            health_issues: self.health_issues,
            blood_group: self.blood_group,
            emergency_contact: self.emergency_contact,
            status: self
                .status
                .parse::<StudentStatus>()
                .unwrap_or(StudentStatus::Active),
            additional_info: parse_json_text(self.additional_info.as_deref()),
            created_at: timestamp_to_datetime(self.created_at),
            updated_at: timestamp_to_datetime(self.updated_at),
        }
    }
}
