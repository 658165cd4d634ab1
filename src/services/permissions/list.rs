use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::PermissionService;
use crate::models::{ApiResponse, roles::requests::RoleListQuery};
use crate::utils::error_response;

pub async fn list_permissions(
    service: &PermissionService,
    query: RoleListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_permissions_with_pagination(query).await {
        Ok(permissions) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            permissions,
            "Permission list retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
