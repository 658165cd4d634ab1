use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::EnrollmentService;
use crate::config::AppConfig;
use crate::models::{
    ApiResponse, ErrorCode,
    enrollments::{entities::EnrollOutcome, requests::CreateEnrollmentRequest},
};
use crate::utils::error_response;
use crate::utils::validate::validate_required;

/// 选课被拒时的响应
pub(super) fn rejection_response(outcome: &EnrollOutcome) -> Option<HttpResponse> {
    let resp = match outcome {
        EnrollOutcome::Enrolled(_) => return None,
        EnrollOutcome::StudentNotFound => HttpResponse::NotFound().json(
            ApiResponse::error_empty(ErrorCode::StudentNotFound, "Student not found"),
        ),
        EnrollOutcome::CourseNotFound => HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::CourseNotFound,
            "Course not found",
        )),
        EnrollOutcome::CourseInactive => HttpResponse::BadRequest().json(
            ApiResponse::error_empty(ErrorCode::ValidationFailed, "Course is not active"),
        ),
        EnrollOutcome::CourseFull => HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::CourseFull,
            "Course has reached its maximum number of students",
        )),
        EnrollOutcome::PaymentRequired => HttpResponse::BadRequest().json(
            ApiResponse::error_empty(
                ErrorCode::PaymentRequired,
                "Student has no paid payment for this academic year",
            ),
        ),
        EnrollOutcome::AlreadyEnrolled => HttpResponse::Conflict().json(
            ApiResponse::error_empty(
                ErrorCode::AlreadyEnrolled,
                "Student is already enrolled in this course",
            ),
        ),
    };
    Some(resp)
}

pub async fn create_enrollment(
    service: &EnrollmentService,
    enrollment: CreateEnrollmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Some(semester) = &enrollment.semester
        && let Err(msg) = validate_required("semester", semester)
    {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    let storage = service.get_storage(request);
    let require_payment = AppConfig::get().enrollment.require_payment;
    let (student_id, course_id) = (enrollment.student_id, enrollment.course_id);

    match storage.create_enrollment(enrollment, require_payment).await {
        Ok(EnrollOutcome::Enrolled(enrollment)) => {
            Ok(HttpResponse::Created().json(ApiResponse::success(
                enrollment,
                "Enrollment created successfully",
            )))
        }
        Ok(outcome) => {
            info!(
                "Enrollment of student {} in course {} rejected: {:?}",
                student_id, course_id, outcome
            );
            Ok(rejection_response(&outcome).unwrap_or_else(|| {
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Unexpected enrollment outcome",
                ))
            }))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_rejection_status() {
        let cases = [
            (EnrollOutcome::StudentNotFound, StatusCode::NOT_FOUND),
            (EnrollOutcome::CourseNotFound, StatusCode::NOT_FOUND),
            (EnrollOutcome::CourseInactive, StatusCode::BAD_REQUEST),
            (EnrollOutcome::CourseFull, StatusCode::CONFLICT),
            (EnrollOutcome::PaymentRequired, StatusCode::BAD_REQUEST),
            (EnrollOutcome::AlreadyEnrolled, StatusCode::CONFLICT),
        ];
        for (outcome, status) in cases {
            let resp = rejection_response(&outcome).unwrap();
            assert_eq!(resp.status(), status, "{outcome:?}");
        }
    }
}
