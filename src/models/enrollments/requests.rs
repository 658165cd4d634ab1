use super::entities::EnrollmentStatus;
use serde::Deserialize;
use ts_rs::TS;

// 选课列表查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct EnrollmentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub student_id: Option<i64>,
    pub course_id: Option<i64>,
    pub academic_year_id: Option<i64>,
    pub semester: Option<String>,
    pub status: Option<EnrollmentStatus>,
}

// 选课请求，学年与学期缺省取课程的值
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct CreateEnrollmentRequest {
    pub student_id: i64,
    pub course_id: i64,
    pub academic_year_id: Option<i64>,
    pub semester: Option<String>,
}

// 选课更新请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct UpdateEnrollmentRequest {
    pub semester: Option<String>,
    pub status: Option<EnrollmentStatus>,
}
