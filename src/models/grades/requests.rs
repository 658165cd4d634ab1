use super::entities::GradeType;
use serde::Deserialize;
use ts_rs::TS;

// 成绩列表查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub student_id: Option<i64>,
    pub course_id: Option<i64>,
    pub academic_year_id: Option<i64>,
    pub grade_type: Option<GradeType>,
    pub recorded_by: Option<i64>,
}

// 成绩录入请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct CreateGradeRequest {
    pub student_id: i64,
    pub course_id: i64,
    pub course_enrollment_id: i64,
    pub grade_value: f64,
    pub grade_type: GradeType,
    pub evaluation_date: chrono::NaiveDate,
    /// 教师录入时忽略，管理员必填
    pub recorded_by: Option<i64>,
}

// 成绩更新请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct UpdateGradeRequest {
    pub grade_value: Option<f64>,
    pub grade_type: Option<GradeType>,
    pub evaluation_date: Option<chrono::NaiveDate>,
}
