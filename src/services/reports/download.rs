use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::warn;

use super::{ReportService, report_not_found};
use crate::models::{ApiResponse, ErrorCode, reports::entities::ReportStatus};
use crate::utils::error_response;

const XLSX_CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

pub async fn download_report(
    service: &ReportService,
    report_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let report = match storage.get_report_by_id(report_id).await {
        Ok(Some(report)) => report.report,
        Ok(None) => return Ok(report_not_found()),
        Err(e) => return Ok(error_response(&e)),
    };

    let path = match (report.status, report.file_path) {
        (ReportStatus::Generated, Some(path)) => path,
        (status, _) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::ReportNotReady,
                format!("Report is not ready (status: {status})"),
            )));
        }
    };

    match tokio::fs::read(&path).await {
        Ok(buffer) => {
            let filename = std::path::Path::new(&path)
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| format!("report_{report_id}.xlsx"));
            Ok(HttpResponse::Ok()
                .content_type(XLSX_CONTENT_TYPE)
                .insert_header((
                    "Content-Disposition",
                    format!("attachment; filename=\"{filename}\""),
                ))
                .body(buffer))
        }
        Err(e) => {
            warn!("Report file {} unreadable: {}", path, e);
            Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::FileNotFound,
                "Report file not found",
            )))
        }
    }
}
