use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ReportService, report_not_found};
use crate::models::ApiResponse;
use crate::utils::error_response;

pub async fn get_report(
    service: &ReportService,
    report_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_report_by_id(report_id).await {
        Ok(Some(report)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            report,
            "Report retrieved successfully",
        ))),
        Ok(None) => Ok(report_not_found()),
        Err(e) => Ok(error_response(&e)),
    }
}
