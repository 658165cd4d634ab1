use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{RoleService, is_builtin_role};
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::error_response;

pub async fn delete_role(
    service: &RoleService,
    role_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_role_by_id(role_id).await {
        Ok(Some(role)) if is_builtin_role(&role.name) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::RoleProtected,
                "Built-in roles cannot be deleted",
            )));
        }
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::RoleNotFound,
                "Role not found",
            )));
        }
        Err(e) => return Ok(error_response(&e)),
    }

    match storage.delete_role(role_id).await {
        Ok(true) => {
            RequireJWT::evict_all_cached_users(request).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Role deleted successfully")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::RoleNotFound,
            "Role not found",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
