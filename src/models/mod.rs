pub mod academic_years;
pub mod auth;
pub mod common;
pub mod courses;
pub mod dashboard;
pub mod departments;
pub mod enrollments;
pub mod files;
pub mod grades;
pub mod payments;
pub mod reports;
pub mod roles;
pub mod schedules;
pub mod students;
pub mod subjects;
pub mod teachers;
pub mod users;

pub use common::{
    ApiResponse, ErrorCode, PaginatedResponse, PaginationInfo, PaginationQuery, RecordStatus,
    SyncIdsRequest,
};

// 应用启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
