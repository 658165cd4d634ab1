use serde::Serialize;
use ts_rs::TS;

/// 照片上传结果
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/file.ts")]
pub struct PhotoUploadResponse {
    /// 存储文件名
    pub file_name: String,
    /// 原始文件名
    pub original_name: String,
    /// 文件大小(字节)
    pub size: i64,
    /// 文件类型
    pub content_type: String,
    /// 写入 photo 字段的访问地址
    pub url: String,
    /// 上传时间
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
}
