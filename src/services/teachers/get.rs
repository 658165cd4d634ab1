use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{TeacherService, teacher_not_found};
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::utils::error_response;

pub async fn get_teacher(
    service: &TeacherService,
    teacher_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_teacher_by_id(teacher_id).await {
        Ok(Some(mut teacher)) => {
            if !RequireJWT::is_admin(request) {
                teacher.redact_sensitive();
            }
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                teacher,
                "Teacher retrieved successfully",
            )))
        }
        Ok(None) => Ok(teacher_not_found()),
        Err(e) => Ok(error_response(&e)),
    }
}
