use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::NaiveDate;

use super::AcademicYearService;
use crate::models::{ApiResponse, ErrorCode, academic_years::requests::CreateAcademicYearRequest};
use crate::utils::error_response;
use crate::utils::validate::{validate_academic_year_label, validate_date_range};

/// 学年标签与起止日期的校验
pub(super) fn validate_academic_year(
    year: &str,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<(), &'static str> {
    validate_academic_year_label(year)?;
    validate_date_range(start_date, end_date)
}

pub async fn create_academic_year(
    service: &AcademicYearService,
    mut year: CreateAcademicYearRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    year.year = year.year.trim().to_string();
    if let Err(msg) = validate_academic_year(&year.year, year.start_date, year.end_date) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    let storage = service.get_storage(request);

    match storage.create_academic_year(year).await {
        Ok(year) => Ok(HttpResponse::Created().json(ApiResponse::success(
            year,
            "Academic year created successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_validate_academic_year() {
        assert!(validate_academic_year("2024-2025", date(2024, 9, 1), date(2025, 7, 1)).is_ok());
        assert!(validate_academic_year("2024-2026", date(2024, 9, 1), date(2025, 7, 1)).is_err());
        assert_eq!(
            validate_academic_year("2024-2025", date(2025, 7, 1), date(2024, 9, 1)),
            Err("End date must be after start date")
        );
    }
}
