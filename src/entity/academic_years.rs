//! 学年实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "academic_years")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub year: String,
    pub start_date: String,
    pub end_date: String,
    pub status: String,
    pub current: bool,
    pub created_at: i64,
    pub updated_at: i64,
    pub deleted_at: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::students::Entity")]
    Students,
    #[sea_orm(has_many = "super::courses::Entity")]
    Courses,
    #[sea_orm(has_many = "super::reports::Entity")]
    Reports,
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Students.def()
    }
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Courses.def()
    }
}

impl Related<super::reports::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reports.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_academic_year(self) -> crate::models::academic_years::entities::AcademicYear {
        use crate::models::academic_years::entities::{AcademicYear, AcademicYearStatus};
        use crate::utils::convert::{parse_stored_date, timestamp_to_datetime};

        AcademicYear {
            id: self.id,
            year: self.year,
            start_date: parse_stored_date(&self.start_date),
            end_date: parse_stored_date(&self.end_date),
            status: self
                .status
                .parse::<AcademicYearStatus>()
                .unwrap_or(AcademicYearStatus::Active),
            current: self.current,
            created_at: timestamp_to_datetime(self.created_at),
            updated_at: timestamp_to_datetime(self.updated_at),
        }
    }
}
