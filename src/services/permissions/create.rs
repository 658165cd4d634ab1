use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::PermissionService;
use crate::models::{ApiResponse, ErrorCode, roles::requests::CreatePermissionRequest};
use crate::utils::error_response;
use crate::utils::validate::{validate_required, validate_slug};

pub(super) fn validate_permission(name: &str, slug: &str) -> Result<(), String> {
    validate_required("name", name)?;
    validate_slug(slug)?;
    Ok(())
}

pub async fn create_permission(
    service: &PermissionService,
    permission: CreatePermissionRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_permission(&permission.name, &permission.slug) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    let storage = service.get_storage(request);

    match storage.create_permission(permission).await {
        Ok(permission) => Ok(HttpResponse::Created().json(ApiResponse::success(
            permission,
            "Permission created successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_permission() {
        assert!(validate_permission("View grades", "grades.view").is_ok());
        assert!(validate_permission("", "grades.view").is_err());
        assert!(validate_permission("View grades", "Grades View").is_err());
    }
}
