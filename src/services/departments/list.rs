use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DepartmentService;
use crate::models::{ApiResponse, departments::requests::DepartmentListQuery};
use crate::utils::error_response;

pub async fn list_departments(
    service: &DepartmentService,
    query: DepartmentListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_departments_with_pagination(query).await {
        Ok(departments) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            departments,
            "Department list retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
