use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ReportService;
use crate::models::{ApiResponse, reports::requests::ReportListQuery};
use crate::utils::error_response;

pub async fn list_reports(
    service: &ReportService,
    query: ReportListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_reports_with_pagination(query).await {
        Ok(reports) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            reports,
            "Report list retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
