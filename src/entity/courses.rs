//! 课程实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub code: String,
    pub name: String,
    pub subject_id: i64,
    pub department_id: i64,
    pub academic_year_id: i64,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub credits: i32,
    pub hours_per_week: i32,
    pub course_type: String,
    pub education_level: String,
    pub semester: String,
    pub max_students: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub prerequisites: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub syllabus: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub objectives: Option<String>,
    pub assessment_method: String,
    pub status: String,
    pub created_at: i64,
    pub updated_at: i64,
    pub deleted_at: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::subjects::Entity",
        from = "Column::SubjectId",
        to = "super::subjects::Column::Id"
    )]
    Subject,
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
}

impl Related<super::subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subject.def()
    }
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

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_course(self) -> crate::models::courses::entities::Course {
        use crate::models::RecordStatus;
        use crate::utils::convert::timestamp_to_datetime;

        crate::models::courses::entities::Course {
            id: self.id,
            code: self.code,
            name: self.name,
            subject_id: self.subject_id,
            department_id: self.department_id,
            academic_year_id: self.academic_year_id,
            description: self.description,
            credits: self.credits,
            hours_per_week: self.hours_per_week,
            course_type: self.course_type,
            education_level: self.education_level,
            semester: self.semester,
            max_students: self.max_students,
            prerequisites: self
                .prerequisites
                .as_deref()
                .and_then(|text| serde_json::from_str::<Vec<String>>(text).ok()),
            syllabus: self.syllabus,
            objectives: self.objectives,
            assessment_method: self.assessment_method,
            status: self
                .status
                .parse::<RecordStatus>()
                .unwrap_or(RecordStatus::Active),
            created_at: timestamp_to_datetime(self.created_at),
            updated_at: timestamp_to_datetime(self.updated_at),
        }
    }
}
