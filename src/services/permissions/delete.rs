use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::PermissionService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::error_response;

pub async fn delete_permission(
    service: &PermissionService,
    permission_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_permission(permission_id).await {
        Ok(true) => {
            RequireJWT::evict_all_cached_users(request).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Permission deleted successfully",
            )))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::PermissionNotFound,
            "Permission not found",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
