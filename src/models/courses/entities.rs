use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::RecordStatus;
use crate::models::teachers::entities::TeacherSummary;

// 课程
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct Course {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub subject_id: i64,
    pub department_id: i64,
    pub academic_year_id: i64,
    pub description: Option<String>,
    pub credits: i32,
    pub hours_per_week: i32,
    pub course_type: String,
    pub education_level: String,
    pub semester: String,
    pub max_students: i32,
    /// 先修课程代码列表
    pub prerequisites: Option<Vec<String>>,
    pub syllabus: Option<String>,
    pub objectives: Option<String>,
    pub assessment_method: String,
    pub status: RecordStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 课程详情（含任课教师与当前选课人数）
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseDetail {
    #[serde(flatten)]
    #[ts(flatten)]
    pub course: Course,
    pub teachers: Vec<TeacherSummary>,
    pub active_enrollments: i64,
}
