use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradeService;
use crate::models::{ApiResponse, grades::requests::GradeListQuery};
use crate::utils::error_response;

pub async fn list_grades(
    service: &GradeService,
    query: GradeListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_grades_with_pagination(query).await {
        Ok(grades) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            grades,
            "Grade list retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
