use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{PaymentService, validate_details, validation_failed};
use crate::models::{ApiResponse, payments::requests::CreatePaymentRequest};
use crate::utils::error_response;
use crate::utils::validate::validate_required;

pub async fn create_payment(
    service: &PaymentService,
    mut payment: CreatePaymentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    payment.reference_number = payment
        .reference_number
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty());

    let checked = validate_required("semester", &payment.semester)
        .and_then(|_| validate_details(&payment.details));
    if let Err(msg) = checked {
        return Ok(validation_failed(msg));
    }

    let storage = service.get_storage(request);

    match storage.create_payment(payment).await {
        Ok(payment) => Ok(HttpResponse::Created().json(ApiResponse::success(
            payment,
            "Payment recorded successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
