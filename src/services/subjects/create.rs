use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubjectService;
use crate::models::{ApiResponse, ErrorCode, subjects::requests::CreateSubjectRequest};
use crate::utils::error_response;
use crate::utils::validate::validate_required;

pub async fn create_subject(
    service: &SubjectService,
    mut subject: CreateSubjectRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    subject.name = subject.name.trim().to_string();
    subject.code = subject.code.trim().to_string();

    if let Err(msg) = validate_required("name", &subject.name)
        .and_then(|_| validate_required("code", &subject.code))
    {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    let storage = service.get_storage(request);

    match storage.create_subject(subject).await {
        Ok(subject) => Ok(HttpResponse::Created().json(ApiResponse::success(
            subject,
            "Subject created successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
