use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{CourseService, course_not_found};
use crate::models::{ApiResponse, PaginationQuery, enrollments::requests::EnrollmentListQuery};
use crate::utils::error_response;

pub async fn list_enrollments(
    service: &CourseService,
    course_id: i64,
    query: PaginationQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_course_by_id(course_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(course_not_found()),
        Err(e) => return Ok(error_response(&e)),
    }

    let query = EnrollmentListQuery {
        page: Some(query.page),
        size: Some(query.size),
        course_id: Some(course_id),
        ..Default::default()
    };

    match storage.list_enrollments_with_pagination(query).await {
        Ok(enrollments) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            enrollments,
            "Course enrollments retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
