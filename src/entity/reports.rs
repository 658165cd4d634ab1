//! 报表实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "reports")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(column_name = "type")]
    pub report_type: String,
    pub academic_year_id: i64,
    pub semester: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub parameters: Option<String>,
    pub generated_by: i64,
    pub file_path: Option<String>,
    pub status: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub error_message: Option<String>,
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
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::GeneratedBy",
        to = "super::users::Column::Id"
    )]
    Generator,
}

impl Related<super::academic_years::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AcademicYear.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Generator.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_report(self) -> crate::models::reports::entities::Report {
        use crate::models::reports::entities::{Report, ReportStatus, ReportType};
        use crate::utils::convert::{parse_json_text, timestamp_to_datetime};

        Report {
            id: self.id,
            title: self.title,
            report_type: self
                .report_type
                .parse::<ReportType>()
                .unwrap_or(ReportType::Statistics),
            academic_year_id: self.academic_year_id,
            semester: self.semester,
            parameters: parse_json_text(self.parameters.as_deref()),
            generated_by: self.generated_by,
            file_path: self.file_path,
            status: self
                .status
                .parse::<ReportStatus>()
                .unwrap_or(ReportStatus::Failed),
            error_message: self.error_message,
            created_at: timestamp_to_datetime(self.created_at),
            updated_at: timestamp_to_datetime(self.updated_at),
        }
    }
}
