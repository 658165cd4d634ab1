use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::define_string_enum;

define_string_enum! {
    /// 学年状态
    #[derive(TS)]
    #[ts(export, export_to = "../frontend/src/types/generated/academic_year.ts")]
    pub enum AcademicYearStatus {
        Active => "active",
        Closed => "closed",
    }
}

// 学年
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academic_year.ts")]
pub struct AcademicYear {
    pub id: i64,
    /// 形如 2024-2025
    pub year: String,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
    pub status: AcademicYearStatus,
    pub current: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
