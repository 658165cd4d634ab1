pub mod error_code;
pub mod pagination;
pub mod response;
pub mod string_enum;

pub use error_code::ErrorCode;
pub use pagination::{PaginatedResponse, PaginationInfo, PaginationQuery};
pub use response::ApiResponse;

use serde::Deserialize;
use ts_rs::TS;

use crate::define_string_enum;

// 多对多关联同步请求（整体替换关联 ID 列表）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/common.ts")]
pub struct SyncIdsRequest {
    pub ids: Vec<i64>,
}

define_string_enum! {
    /// 通用记录状态（院系、科目、课程）
    #[derive(TS)]
    #[ts(export, export_to = "../frontend/src/types/generated/common.ts")]
    pub enum RecordStatus {
        Active => "active",
        Inactive => "inactive",
    }
}
