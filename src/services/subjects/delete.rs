use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{SubjectService, subject_not_found};
use crate::models::ApiResponse;
use crate::utils::error_response;

pub async fn delete_subject(
    service: &SubjectService,
    subject_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_subject(subject_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Subject deleted successfully",
        ))),
        Ok(false) => Ok(subject_not_found()),
        Err(e) => Ok(error_response(&e)),
    }
}
