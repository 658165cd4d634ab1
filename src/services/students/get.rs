use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{StudentService, authorize_student_access, student_not_found};
use crate::models::ApiResponse;
use crate::utils::error_response;

pub async fn get_student(
    service: &StudentService,
    student_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(resp) = authorize_student_access(&storage, request, student_id).await {
        return Ok(resp);
    }

    match storage.get_student_by_id(student_id).await {
        Ok(Some(student)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            student,
            "Student retrieved successfully",
        ))),
        Ok(None) => Ok(student_not_found()),
        Err(e) => Ok(error_response(&e)),
    }
}
