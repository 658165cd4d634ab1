use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AcademicYearService;
use super::create::validate_academic_year;
use crate::models::{ApiResponse, ErrorCode, academic_years::requests::UpdateAcademicYearRequest};
use crate::utils::error_response;

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::AcademicYearNotFound,
        "Academic year not found",
    ))
}

pub async fn update_academic_year(
    service: &AcademicYearService,
    year_id: i64,
    mut update: UpdateAcademicYearRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let existing = match storage.get_academic_year_by_id(year_id).await {
        Ok(Some(year)) => year,
        Ok(None) => return Ok(not_found()),
        Err(e) => return Ok(error_response(&e)),
    };

    // 合并后的标签和日期整体校验
    if let Some(ref mut year) = update.year {
        *year = year.trim().to_string();
    }
    let label = update.year.as_deref().unwrap_or(&existing.year);
    let start_date = update.start_date.unwrap_or(existing.start_date);
    let end_date = update.end_date.unwrap_or(existing.end_date);
    if let Err(msg) = validate_academic_year(label, start_date, end_date) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    match storage.update_academic_year(year_id, update).await {
        Ok(Some(year)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            year,
            "Academic year updated successfully",
        ))),
        Ok(None) => Ok(not_found()),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn set_current_academic_year(
    service: &AcademicYearService,
    year_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.set_current_academic_year(year_id).await {
        Ok(Some(year)) => {
            tracing::info!("Academic year {} is now current", year.year);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                year,
                "Current academic year updated successfully",
            )))
        }
        Ok(None) => Ok(not_found()),
        Err(e) => Ok(error_response(&e)),
    }
}
