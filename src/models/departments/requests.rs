use crate::models::RecordStatus;
use serde::Deserialize;
use ts_rs::TS;

// 院系列表查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/department.ts")]
pub struct DepartmentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub academic_year_id: Option<i64>,
    pub status: Option<RecordStatus>,
    /// 名称或代码模糊匹配
    pub search: Option<String>,
}

// 院系创建请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/department.ts")]
pub struct CreateDepartmentRequest {
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    pub head_teacher_id: Option<i64>,
    pub academic_year_id: i64,
    pub status: Option<RecordStatus>,
}

// 院系更新请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/department.ts")]
pub struct UpdateDepartmentRequest {
    pub name: Option<String>,
    pub code: Option<String>,
    pub description: Option<String>,
    pub head_teacher_id: Option<i64>,
    pub academic_year_id: Option<i64>,
    pub status: Option<RecordStatus>,
}
