use serde::Serialize;
use ts_rs::TS;

use crate::models::academic_years::entities::AcademicYear;

// 仪表盘统计
#[derive(Debug, Clone, Default, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct DashboardStats {
    pub current_academic_year: Option<AcademicYear>,
    pub active_students: i64,
    pub teachers: i64,
    pub active_courses: i64,
    pub active_enrollments: i64,
    /// 当前学年已缴金额
    pub paid_total: f64,
    /// 当前学年待缴金额
    pub pending_total: f64,
}
