use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::header};
use std::path::Path;
use tracing::error;

use super::FileService;
use crate::config::AppConfig;
use crate::errors::SchoolError;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::file_magic::image_content_type;

/// 文件名已由 SafePhotoName 校验，不含路径分隔符
pub async fn serve_photo(
    _service: &FileService,
    _request: &HttpRequest,
    file_name: String,
) -> ActixResult<HttpResponse> {
    let config = AppConfig::get();
    let file_path = Path::new(&config.upload.dir).join(&file_name);

    let buf = match tokio::fs::read(&file_path).await {
        Ok(buf) => buf,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::FileNotFound,
                "File not found",
            )));
        }
        Err(e) => {
            error!("{}", SchoolError::file_operation(format!("{e}")));
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "File read failed",
                )),
            );
        }
    };

    let extension = Path::new(&file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default();

    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, image_content_type(&extension)))
        .insert_header((header::CACHE_CONTROL, "private, max-age=86400"))
        .body(buf))
}
