use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::warn;

use super::{ReportService, report_not_found};
use crate::models::ApiResponse;
use crate::utils::error_response;

pub async fn delete_report(
    service: &ReportService,
    report_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let file_path = match storage.get_report_by_id(report_id).await {
        Ok(Some(report)) => report.report.file_path,
        Ok(None) => return Ok(report_not_found()),
        Err(e) => return Ok(error_response(&e)),
    };

    match storage.delete_report(report_id).await {
        Ok(true) => {
            if let Some(path) = file_path
                && let Err(e) = tokio::fs::remove_file(&path).await
            {
                warn!("Failed to remove report file {}: {}", path, e);
            }
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Report deleted successfully",
            )))
        }
        Ok(false) => Ok(report_not_found()),
        Err(e) => Ok(error_response(&e)),
    }
}
