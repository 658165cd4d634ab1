use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::RoleService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, SyncIdsRequest};
use crate::utils::error_response;

pub async fn sync_permissions(
    service: &RoleService,
    role_id: i64,
    ids: SyncIdsRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.sync_role_permissions(role_id, ids.ids).await {
        Ok(Some(role)) => {
            // 权限变化影响所有持有该角色的用户
            RequireJWT::evict_all_cached_users(request).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                role,
                "Role permissions updated successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::RoleNotFound,
            "Role not found",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
