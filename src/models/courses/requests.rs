use crate::models::RecordStatus;
use serde::Deserialize;
use ts_rs::TS;

// 课程列表查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub department_id: Option<i64>,
    pub subject_id: Option<i64>,
    pub academic_year_id: Option<i64>,
    pub semester: Option<String>,
    pub status: Option<RecordStatus>,
    /// 名称或代码模糊匹配
    pub search: Option<String>,
}

// 课程创建请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CreateCourseRequest {
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
    pub prerequisites: Option<Vec<String>>,
    pub syllabus: Option<String>,
    pub objectives: Option<String>,
    pub assessment_method: String,
    pub status: Option<RecordStatus>,
    /// 任课教师 ID
    #[serde(default)]
    pub teacher_ids: Vec<i64>,
}

// 课程更新请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct UpdateCourseRequest {
    pub code: Option<String>,
    pub name: Option<String>,
    pub subject_id: Option<i64>,
    pub department_id: Option<i64>,
    pub academic_year_id: Option<i64>,
    pub description: Option<String>,
    pub credits: Option<i32>,
    pub hours_per_week: Option<i32>,
    pub course_type: Option<String>,
    pub education_level: Option<String>,
    pub semester: Option<String>,
    pub max_students: Option<i32>,
    pub prerequisites: Option<Vec<String>>,
    pub syllabus: Option<String>,
    pub objectives: Option<String>,
    pub assessment_method: Option<String>,
    pub status: Option<RecordStatus>,
}
