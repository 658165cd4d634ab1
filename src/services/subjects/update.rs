use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{SubjectService, subject_not_found};
use crate::models::{ApiResponse, ErrorCode, subjects::requests::UpdateSubjectRequest};
use crate::utils::error_response;
use crate::utils::validate::validate_required;

pub async fn update_subject(
    service: &SubjectService,
    subject_id: i64,
    update: UpdateSubjectRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    for (field, value) in [("name", &update.name), ("code", &update.code)] {
        if let Some(value) = value
            && let Err(msg) = validate_required(field, value)
        {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
        }
    }

    let storage = service.get_storage(request);

    match storage.update_subject(subject_id, update).await {
        Ok(Some(subject)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            subject,
            "Subject updated successfully",
        ))),
        Ok(None) => Ok(subject_not_found()),
        Err(e) => Ok(error_response(&e)),
    }
}
