use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AcademicYearService;
use crate::models::{ApiResponse, academic_years::requests::AcademicYearListQuery};
use crate::utils::error_response;

pub async fn list_academic_years(
    service: &AcademicYearService,
    query: AcademicYearListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_academic_years_with_pagination(query).await {
        Ok(years) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            years,
            "Academic year list retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
