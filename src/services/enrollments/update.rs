use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{EnrollmentService, create::rejection_response, enrollment_not_found};
use crate::models::{
    ApiResponse, ErrorCode,
    enrollments::{entities::EnrollOutcome, requests::UpdateEnrollmentRequest},
};
use crate::utils::error_response;
use crate::utils::validate::validate_required;

pub async fn update_enrollment(
    service: &EnrollmentService,
    enrollment_id: i64,
    update: UpdateEnrollmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Some(semester) = &update.semester
        && let Err(msg) = validate_required("semester", semester)
    {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    let storage = service.get_storage(request);

    match storage.update_enrollment(enrollment_id, update).await {
        Ok(Some(EnrollOutcome::Enrolled(enrollment))) => Ok(HttpResponse::Ok().json(
            ApiResponse::success(enrollment, "Enrollment updated successfully"),
        )),
        Ok(Some(rejected)) => {
            Ok(rejection_response(&rejected).unwrap_or_else(enrollment_not_found))
        }
        Ok(None) => Ok(enrollment_not_found()),
        Err(e) => Ok(error_response(&e)),
    }
}
