use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ReportService;
use crate::models::{
    ApiResponse,
    reports::{entities::ReportType, responses::ReportOptions},
};
use crate::utils::error_response;

pub async fn get_options(
    service: &ReportService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_all_academic_years().await {
        Ok(academic_years) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ReportOptions {
                academic_years,
                report_types: ReportType::ALL.to_vec(),
            },
            "Report options retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
