use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{GradeService, grade_not_found, resolve_recorder, validate_grade_value};
use crate::config::AppConfig;
use crate::models::{ApiResponse, ErrorCode, grades::requests::UpdateGradeRequest};
use crate::utils::error_response;

pub async fn update_grade(
    service: &GradeService,
    grade_id: i64,
    update: UpdateGradeRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Some(value) = update.grade_value
        && let Err(msg) = validate_grade_value(value, AppConfig::get().grading.max_value)
    {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    let storage = service.get_storage(request);

    let grade = match storage.get_grade_by_id(grade_id).await {
        Ok(Some(grade)) => grade,
        Ok(None) => return Ok(grade_not_found()),
        Err(e) => return Ok(error_response(&e)),
    };
    if let Err(resp) = resolve_recorder(&storage, request, grade.course_id).await {
        return Ok(resp);
    }

    match storage.update_grade(grade_id, update).await {
        Ok(Some(grade)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            grade,
            "Grade updated successfully",
        ))),
        Ok(None) => Ok(grade_not_found()),
        Err(e) => Ok(error_response(&e)),
    }
}
