use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::RoleService;
use crate::models::{ApiResponse, roles::requests::RoleListQuery};
use crate::utils::error_response;

pub async fn list_roles(
    service: &RoleService,
    query: RoleListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_roles_with_pagination(query).await {
        Ok(roles) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            roles,
            "Role list retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
