use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::define_string_enum;

define_string_enum! {
    /// 成绩类型
    #[derive(TS)]
    #[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
    pub enum GradeType {
        Exam => "exam",
        Quiz => "quiz",
        Assignment => "assignment",
        Project => "project",
        Participation => "participation",
        Final => "final",
    }
}

// 成绩
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct Grade {
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    pub course_enrollment_id: i64,
    pub academic_year_id: i64,
    pub grade_value: f64,
    pub grade_type: GradeType,
    pub evaluation_date: chrono::NaiveDate,
    pub recorded_by: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
