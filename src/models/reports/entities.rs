use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::define_string_enum;
use crate::models::academic_years::entities::AcademicYear;

define_string_enum! {
    /// 报表类型
    #[derive(TS)]
    #[ts(export, export_to = "../frontend/src/types/generated/report.ts")]
    pub enum ReportType {
        Academic => "academic",
        Financial => "financial",
        Statistics => "statistics",
    }
}

define_string_enum! {
    /// 报表生成状态
    #[derive(TS)]
    #[ts(export, export_to = "../frontend/src/types/generated/report.ts")]
    pub enum ReportStatus {
        Pending => "pending",
        Processing => "processing",
        Generated => "generated",
        Failed => "failed",
    }
}

// 报表
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/report.ts")]
pub struct Report {
    pub id: i64,
    pub title: String,
    #[serde(rename = "type")]
    pub report_type: ReportType,
    pub academic_year_id: i64,
    pub semester: Option<String>,
    pub parameters: Option<serde_json::Value>,
    pub generated_by: i64,
    pub file_path: Option<String>,
    pub status: ReportStatus,
    pub error_message: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 报表生成人
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/report.ts")]
pub struct ReportGenerator {
    pub id: i64,
    pub name: String,
    pub email: String,
}

// 报表（含学年与生成人）
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/report.ts")]
pub struct ReportWithRelations {
    #[serde(flatten)]
    #[ts(flatten)]
    pub report: Report,
    pub academic_year: Option<AcademicYear>,
    pub generator: Option<ReportGenerator>,
}
