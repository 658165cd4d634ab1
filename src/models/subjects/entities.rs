use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::RecordStatus;
use crate::models::teachers::entities::TeacherSummary;

// 科目
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct Subject {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub department_id: i64,
    pub description: Option<String>,
    pub academic_year_id: i64,
    pub status: RecordStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 科目详情（含任课教师）
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct SubjectDetail {
    #[serde(flatten)]
    #[ts(flatten)]
    pub subject: Subject,
    pub teachers: Vec<TeacherSummary>,
}
