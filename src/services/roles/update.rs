use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{RoleService, is_builtin_role};
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, roles::requests::UpdateRoleRequest};
use crate::utils::error_response;
use crate::utils::validate::validate_required;

pub async fn update_role(
    service: &RoleService,
    role_id: i64,
    update: UpdateRoleRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let existing = match storage.get_role_by_id(role_id).await {
        Ok(Some(role)) => role,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::RoleNotFound,
                "Role not found",
            )));
        }
        Err(e) => return Ok(error_response(&e)),
    };

    if let Some(ref name) = update.name {
        if let Err(msg) = validate_required("name", name) {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
        }
        // 内置角色名与代码中的角色判断绑定
        if is_builtin_role(&existing.name) && name != &existing.name {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::RoleProtected,
                "Built-in roles cannot be renamed",
            )));
        }
    }

    match storage.update_role(role_id, update).await {
        Ok(Some(role)) => {
            RequireJWT::evict_all_cached_users(request).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(role, "Role updated successfully")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::RoleNotFound,
            "Role not found",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
