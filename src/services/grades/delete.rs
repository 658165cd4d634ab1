use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{GradeService, grade_not_found, resolve_recorder};
use crate::models::ApiResponse;
use crate::utils::error_response;

pub async fn delete_grade(
    service: &GradeService,
    grade_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let grade = match storage.get_grade_by_id(grade_id).await {
        Ok(Some(grade)) => grade,
        Ok(None) => return Ok(grade_not_found()),
        Err(e) => return Ok(error_response(&e)),
    };
    if let Err(resp) = resolve_recorder(&storage, request, grade.course_id).await {
        return Ok(resp);
    }

    match storage.delete_grade(grade_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Grade deleted successfully",
        ))),
        Ok(false) => Ok(grade_not_found()),
        Err(e) => Ok(error_response(&e)),
    }
}
