use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{GradeService, Recorder, resolve_recorder, validate_grade_value};
use crate::config::AppConfig;
use crate::models::{ApiResponse, ErrorCode, grades::requests::CreateGradeRequest};
use crate::utils::error_response;

pub async fn create_grade(
    service: &GradeService,
    grade: CreateGradeRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_grade_value(grade.grade_value, AppConfig::get().grading.max_value) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    let storage = service.get_storage(request);

    let recorded_by = match resolve_recorder(&storage, request, grade.course_id).await {
        Ok(Recorder::Teacher(teacher_id)) => teacher_id,
        Ok(Recorder::Admin) => {
            let Some(teacher_id) = grade.recorded_by else {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::ValidationFailed,
                    "recorded_by is required",
                )));
            };
            match storage.get_teacher_by_id(teacher_id).await {
                Ok(Some(_)) => teacher_id,
                Ok(None) => {
                    return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                        ErrorCode::ValidationFailed,
                        format!("Teacher {teacher_id} does not exist"),
                    )));
                }
                Err(e) => return Ok(error_response(&e)),
            }
        }
        Err(resp) => return Ok(resp),
    };

    match storage.create_grade(grade, recorded_by).await {
        Ok(grade) => Ok(HttpResponse::Created().json(ApiResponse::success(
            grade,
            "Grade recorded successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
