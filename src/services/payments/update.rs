use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{PaymentService, payment_not_found, validate_details, validation_failed};
use crate::errors::SchoolError;
use crate::models::{ApiResponse, ErrorCode, payments::requests::UpdatePaymentRequest};
use crate::utils::error_response;
use crate::utils::http::error_response_as;
use crate::utils::validate::validate_required;

pub async fn update_payment(
    service: &PaymentService,
    payment_id: i64,
    update: UpdatePaymentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Some(semester) = &update.semester
        && let Err(msg) = validate_required("semester", semester)
    {
        return Ok(validation_failed(msg));
    }
    if let Some(details) = &update.details
        && let Err(msg) = validate_details(details)
    {
        return Ok(validation_failed(msg));
    }

    let storage = service.get_storage(request);

    match storage.update_payment(payment_id, update).await {
        Ok(Some(payment)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            payment,
            "Payment updated successfully",
        ))),
        Ok(None) => Ok(payment_not_found()),
        Err(e @ SchoolError::Conflict(_)) => Ok(error_response_as(
            &e,
            ErrorCode::InvalidPaymentTransition,
        )),
        Err(e) => Ok(error_response(&e)),
    }
}
