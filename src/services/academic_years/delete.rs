use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AcademicYearService;
use crate::errors::SchoolError;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::error_response;
use crate::utils::http::error_response_as;

pub async fn delete_academic_year(
    service: &AcademicYearService,
    year_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_academic_year(year_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Academic year deleted successfully",
        ))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AcademicYearNotFound,
            "Academic year not found",
        ))),
        Err(e @ SchoolError::Conflict(_)) => {
            Ok(error_response_as(&e, ErrorCode::AcademicYearInUse))
        }
        Err(e) => Ok(error_response(&e)),
    }
}
