use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{TeacherService, teacher_not_found};
use crate::models::ApiResponse;
use crate::utils::error_response;

pub async fn delete_teacher(
    service: &TeacherService,
    teacher_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_teacher(teacher_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Teacher deleted successfully",
        ))),
        Ok(false) => Ok(teacher_not_found()),
        Err(e) => Ok(error_response(&e)),
    }
}
