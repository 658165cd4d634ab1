use crate::models::RecordStatus;
use serde::Deserialize;
use ts_rs::TS;

// 科目列表查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct SubjectListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub department_id: Option<i64>,
    pub academic_year_id: Option<i64>,
    pub status: Option<RecordStatus>,
    pub search: Option<String>,
}

// 科目创建请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct CreateSubjectRequest {
    pub name: String,
    pub code: String,
    pub department_id: i64,
    pub description: Option<String>,
    pub academic_year_id: i64,
    pub status: Option<RecordStatus>,
    /// 任课教师 ID
    #[serde(default)]
    pub teacher_ids: Vec<i64>,
}

// 科目更新请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct UpdateSubjectRequest {
    pub name: Option<String>,
    pub code: Option<String>,
    pub department_id: Option<i64>,
    pub description: Option<String>,
    pub academic_year_id: Option<i64>,
    pub status: Option<RecordStatus>,
}
