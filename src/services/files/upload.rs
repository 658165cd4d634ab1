use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;
use std::path::Path;
use tracing::{error, info};
use uuid::Uuid;

use super::{FileService, photo_url};
use crate::config::AppConfig;
use crate::errors::SchoolError;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, files::responses::PhotoUploadResponse};
use crate::utils::file_magic::{image_content_type, validate_magic_bytes};

const IMAGE_EXTENSIONS: [&str; 5] = [".png", ".jpg", ".jpeg", ".gif", ".webp"];

/// 取小写扩展名（含点号），只接受图片类型且在配置允许范围内
fn allowed_extension(original_name: &str, allowed_types: &[String]) -> Option<String> {
    let extension = Path::new(original_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))?;

    let allowed = IMAGE_EXTENSIONS.contains(&extension.as_str())
        && allowed_types
            .iter()
            .any(|t| t.to_lowercase() == extension);
    allowed.then_some(extension)
}

fn upload_failed(message: &str) -> HttpResponse {
    HttpResponse::InternalServerError()
        .json(ApiResponse::error_empty(ErrorCode::FileUploadFailed, message))
}

pub async fn upload_photo(
    _service: &FileService,
    req: &HttpRequest,
    mut payload: Multipart,
) -> ActixResult<HttpResponse> {
    let config = AppConfig::get();
    let upload_dir = &config.upload.dir;
    let max_size = config.upload.max_size;

    let mut photo: Option<(String, String, Vec<u8>)> = None;

    while let Ok(Some(mut field)) = payload.try_next().await {
        let content_disposition = field.content_disposition();
        let name = content_disposition
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();
        if name != "file" {
            continue;
        }

        if photo.is_some() {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::MultifileUploadNotAllowed,
                "Only one file can be uploaded at a time",
            )));
        }

        let original_name = content_disposition
            .and_then(|cd| cd.get_filename())
            .map(|s| s.to_string())
            .unwrap_or_default();

        let Some(extension) = allowed_extension(&original_name, &config.upload.allowed_types)
        else {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::FileTypeNotAllowed,
                "File type not allowed",
            )));
        };

        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk?;
            if data.len() + chunk.len() > max_size {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::FileSizeExceeded,
                    "File size exceeds the limit",
                )));
            }
            data.extend_from_slice(&chunk);
        }

        if !validate_magic_bytes(&data, &extension) {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::FileTypeNotAllowed,
                "File content does not match its extension",
            )));
        }

        photo = Some((original_name, extension, data));
    }

    let Some((original_name, extension, data)) = photo else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::FileNotFound,
            "No file found in upload payload",
        )));
    };

    if let Err(e) = tokio::fs::create_dir_all(upload_dir).await {
        error!("{}", SchoolError::file_operation(format!("{e}")));
        return Ok(upload_failed("Failed to create upload directory"));
    }

    let file_name = format!("{}{}", Uuid::new_v4(), extension);
    let file_path = Path::new(upload_dir).join(&file_name);
    if let Err(e) = tokio::fs::write(&file_path, &data).await {
        error!("{}", SchoolError::file_operation(format!("{e}")));
        return Ok(upload_failed("Failed to store file"));
    }

    info!(
        "Photo {} uploaded by user {:?}",
        file_name,
        RequireJWT::extract_user_id(req)
    );

    let response = PhotoUploadResponse {
        url: photo_url(&file_name),
        content_type: image_content_type(&extension).to_string(),
        size: data.len() as i64,
        file_name,
        original_name,
        uploaded_at: chrono::Utc::now(),
    };

    Ok(HttpResponse::Created().json(ApiResponse::success(
        response,
        "Photo uploaded successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_extension() {
        let allowed = vec![".png".to_string(), ".jpg".to_string(), ".pdf".to_string()];
        assert_eq!(
            allowed_extension("avatar.PNG", &allowed).as_deref(),
            Some(".png")
        );
        assert_eq!(allowed_extension("id.jpg", &allowed).as_deref(), Some(".jpg"));
        // 配置允许但不是图片
        assert_eq!(allowed_extension("scan.pdf", &allowed), None);
        // 是图片但配置未允许
        assert_eq!(allowed_extension("anim.gif", &allowed), None);
        assert_eq!(allowed_extension("noext", &allowed), None);
    }
}
