use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{PaymentService, payment_not_found};
use crate::models::ApiResponse;
use crate::utils::error_response;

pub async fn delete_payment(
    service: &PaymentService,
    payment_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_payment(payment_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Payment deleted successfully",
        ))),
        Ok(false) => Ok(payment_not_found()),
        Err(e) => Ok(error_response(&e)),
    }
}
