use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{CourseService, course_not_found, validate_course_numbers};
use crate::models::{ApiResponse, ErrorCode, courses::requests::UpdateCourseRequest};
use crate::utils::error_response;
use crate::utils::validate::validate_required;

pub async fn update_course(
    service: &CourseService,
    course_id: i64,
    update: UpdateCourseRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let checked = [
        ("code", &update.code),
        ("name", &update.name),
        ("semester", &update.semester),
    ]
    .into_iter()
    .filter_map(|(field, value)| value.as_ref().map(|v| validate_required(field, v)))
    .collect::<Result<Vec<_>, _>>()
    .and_then(|_| {
        validate_course_numbers(update.credits, update.hours_per_week, update.max_students)
    });

    if let Err(msg) = checked {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    let storage = service.get_storage(request);

    match storage.update_course(course_id, update).await {
        Ok(Some(course)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            course,
            "Course updated successfully",
        ))),
        Ok(None) => Ok(course_not_found()),
        Err(e) => Ok(error_response(&e)),
    }
}
