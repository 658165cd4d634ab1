use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{PaymentService, payment_not_found};
use crate::models::ApiResponse;
use crate::utils::error_response;

pub async fn get_payment(
    service: &PaymentService,
    payment_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_payment_by_id(payment_id).await {
        Ok(Some(payment)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            payment,
            "Payment retrieved successfully",
        ))),
        Ok(None) => Ok(payment_not_found()),
        Err(e) => Ok(error_response(&e)),
    }
}
