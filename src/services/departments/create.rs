use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DepartmentService;
use crate::models::{ApiResponse, ErrorCode, departments::requests::CreateDepartmentRequest};
use crate::utils::error_response;
use crate::utils::validate::validate_required;

pub async fn create_department(
    service: &DepartmentService,
    mut department: CreateDepartmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    department.name = department.name.trim().to_string();
    department.code = department.code.trim().to_string();

    if let Err(msg) = validate_required("name", &department.name)
        .and_then(|_| validate_required("code", &department.code))
    {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    let storage = service.get_storage(request);

    match storage.create_department(department).await {
        Ok(department) => Ok(HttpResponse::Created().json(ApiResponse::success(
            department,
            "Department created successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
