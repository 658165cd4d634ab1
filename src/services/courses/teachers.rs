use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{CourseService, course_not_found};
use crate::models::{ApiResponse, SyncIdsRequest};
use crate::utils::error_response;

pub async fn sync_teachers(
    service: &CourseService,
    course_id: i64,
    ids: SyncIdsRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.sync_course_teachers(course_id, ids.ids).await {
        Ok(Some(course)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            course,
            "Course teachers updated successfully",
        ))),
        Ok(None) => Ok(course_not_found()),
        Err(e) => Ok(error_response(&e)),
    }
}
