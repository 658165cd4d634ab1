use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DepartmentService;
use crate::models::{ApiResponse, ErrorCode, departments::requests::UpdateDepartmentRequest};
use crate::utils::error_response;
use crate::utils::validate::validate_required;

pub async fn update_department(
    service: &DepartmentService,
    department_id: i64,
    mut update: UpdateDepartmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Some(ref mut code) = update.code {
        *code = code.trim().to_string();
    }
    for (field, value) in [("name", &update.name), ("code", &update.code)] {
        if let Some(value) = value
            && let Err(msg) = validate_required(field, value)
        {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
        }
    }

    let storage = service.get_storage(request);

    match storage.update_department(department_id, update).await {
        Ok(Some(department)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            department,
            "Department updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::DepartmentNotFound,
            "Department not found",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
