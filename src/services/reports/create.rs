use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ReportService;
use super::queue::EnqueueError;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, reports::requests::CreateReportRequest};
use crate::utils::error_response;
use crate::utils::validate::validate_required;

pub async fn create_report(
    service: &ReportService,
    mut report: CreateReportRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    report.title = report.title.trim().to_string();
    report.semester = report
        .semester
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    if let Err(msg) = validate_required("title", &report.title) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Authentication required",
        )));
    };

    let storage = service.get_storage(request);

    let report = match storage.create_report(report, user_id).await {
        Ok(report) => report,
        Err(e) => return Ok(error_response(&e)),
    };

    match service.get_queue(request).dispatch(&storage, report.id).await {
        Ok(()) => Ok(HttpResponse::Accepted().json(ApiResponse::success(
            report,
            "Report generation started",
        ))),
        Err(EnqueueError::Full) => Ok(HttpResponse::ServiceUnavailable().json(
            ApiResponse::error_empty(
                ErrorCode::ReportQueueFull,
                "Report queue is full, please try again later",
            ),
        )),
        Err(EnqueueError::Closed) => Ok(HttpResponse::InternalServerError().json(
            ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                "Report worker is not running",
            ),
        )),
    }
}
