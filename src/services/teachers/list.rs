use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeacherService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, teachers::requests::TeacherListQuery};
use crate::utils::error_response;

pub async fn list_teachers(
    service: &TeacherService,
    query: TeacherListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_teachers_with_pagination(query).await {
        Ok(mut teachers) => {
            if !RequireJWT::is_admin(request) {
                teachers.items.iter_mut().for_each(|t| t.redact_sensitive());
            }
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                teachers,
                "Teacher list retrieved successfully",
            )))
        }
        Err(e) => Ok(error_response(&e)),
    }
}
