use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::PermissionService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, roles::requests::UpdatePermissionRequest};
use crate::utils::error_response;
use crate::utils::validate::{validate_required, validate_slug};

pub async fn update_permission(
    service: &PermissionService,
    permission_id: i64,
    update: UpdatePermissionRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Some(ref name) = update.name
        && let Err(msg) = validate_required("name", name)
    {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }
    if let Some(ref slug) = update.slug
        && let Err(msg) = validate_slug(slug)
    {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    let storage = service.get_storage(request);

    match storage.update_permission(permission_id, update).await {
        Ok(Some(permission)) => {
            RequireJWT::evict_all_cached_users(request).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                permission,
                "Permission updated successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::PermissionNotFound,
            "Permission not found",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
