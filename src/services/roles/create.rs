use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::RoleService;
use crate::models::{ApiResponse, ErrorCode, roles::requests::CreateRoleRequest};
use crate::utils::error_response;
use crate::utils::validate::validate_required;

pub async fn create_role(
    service: &RoleService,
    mut role: CreateRoleRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    role.name = role.name.trim().to_string();
    if let Err(msg) = validate_required("name", &role.name) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    let storage = service.get_storage(request);

    match storage.create_role(role).await {
        Ok(role) => Ok(HttpResponse::Created().json(ApiResponse::success(role, "Role created successfully"))),
        Err(e) => Ok(error_response(&e)),
    }
}
