use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{SubjectService, subject_not_found};
use crate::models::ApiResponse;
use crate::utils::error_response;

pub async fn get_subject(
    service: &SubjectService,
    subject_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_subject_detail(subject_id).await {
        Ok(Some(subject)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            subject,
            "Subject retrieved successfully",
        ))),
        Ok(None) => Ok(subject_not_found()),
        Err(e) => Ok(error_response(&e)),
    }
}
