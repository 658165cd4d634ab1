use serde::Serialize;
use ts_rs::TS;

use super::entities::ReportType;
use crate::models::academic_years::entities::AcademicYear;

// 报表创建页所需选项
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/report.ts")]
pub struct ReportOptions {
    pub academic_years: Vec<AcademicYear>,
    pub report_types: Vec<ReportType>,
}
