use super::entities::AcademicYearStatus;
use serde::Deserialize;
use ts_rs::TS;

// 学年列表查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academic_year.ts")]
pub struct AcademicYearListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub status: Option<AcademicYearStatus>,
}

// 学年创建请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academic_year.ts")]
pub struct CreateAcademicYearRequest {
    pub year: String,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
    pub status: Option<AcademicYearStatus>,
    #[serde(default)]
    pub current: bool,
}

// 学年更新请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academic_year.ts")]
pub struct UpdateAcademicYearRequest {
    pub year: Option<String>,
    pub start_date: Option<chrono::NaiveDate>,
    pub end_date: Option<chrono::NaiveDate>,
    pub status: Option<AcademicYearStatus>,
    pub current: Option<bool>,
}
