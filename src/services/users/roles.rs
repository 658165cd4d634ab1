use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, users::requests::SyncUserRolesRequest};
use crate::utils::error_response;

pub async fn sync_roles(
    service: &UserService,
    user_id: i64,
    roles: SyncUserRolesRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.sync_user_roles(user_id, roles.roles).await {
        Ok(Some(user)) => {
            RequireJWT::evict_cached_user(request, user_id).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(user, "User roles updated successfully")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "User not found",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
