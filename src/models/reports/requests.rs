use super::entities::{ReportStatus, ReportType};
use serde::Deserialize;
use ts_rs::TS;

// 报表列表查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/report.ts")]
pub struct ReportListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub academic_year_id: Option<i64>,
    #[serde(rename = "type")]
    pub report_type: Option<ReportType>,
    pub status: Option<ReportStatus>,
}

// 报表生成请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/report.ts")]
pub struct CreateReportRequest {
    pub title: String,
    #[serde(rename = "type")]
    pub report_type: ReportType,
    pub academic_year_id: i64,
    pub semester: Option<String>,
    pub parameters: Option<serde_json::Value>,
}
