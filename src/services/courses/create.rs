use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{CourseService, validate_course_numbers};
use crate::models::{ApiResponse, ErrorCode, courses::requests::CreateCourseRequest};
use crate::utils::error_response;
use crate::utils::validate::validate_required;

fn validate_new_course(course: &CreateCourseRequest) -> Result<(), String> {
    for (field, value) in [
        ("code", &course.code),
        ("name", &course.name),
        ("course_type", &course.course_type),
        ("education_level", &course.education_level),
        ("semester", &course.semester),
        ("assessment_method", &course.assessment_method),
    ] {
        validate_required(field, value)?;
    }
    validate_course_numbers(
        Some(course.credits),
        Some(course.hours_per_week),
        Some(course.max_students),
    )
}

pub async fn create_course(
    service: &CourseService,
    mut course: CreateCourseRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    course.code = course.code.trim().to_string();

    if let Err(msg) = validate_new_course(&course) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    let storage = service.get_storage(request);

    match storage.create_course(course).await {
        Ok(course) => Ok(HttpResponse::Created().json(ApiResponse::success(
            course,
            "Course created successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
