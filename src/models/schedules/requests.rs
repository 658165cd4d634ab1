use super::entities::DayOfWeek;
use serde::Deserialize;
use ts_rs::TS;

// 课表列表查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/schedule.ts")]
pub struct ScheduleListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub course_id: Option<i64>,
    pub teacher_id: Option<i64>,
    pub academic_year_id: Option<i64>,
    pub day_of_week: Option<DayOfWeek>,
    pub room: Option<String>,
}

// 课表创建请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/schedule.ts")]
pub struct CreateScheduleRequest {
    pub course_id: i64,
    pub teacher_id: i64,
    pub academic_year_id: i64,
    pub day_of_week: DayOfWeek,
    pub start_time: String,
    pub end_time: String,
    pub room: String,
}

// 课表更新请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/schedule.ts")]
pub struct UpdateScheduleRequest {
    pub course_id: Option<i64>,
    pub teacher_id: Option<i64>,
    pub academic_year_id: Option<i64>,
    pub day_of_week: Option<DayOfWeek>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub room: Option<String>,
}
