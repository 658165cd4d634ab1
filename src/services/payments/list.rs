use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::PaymentService;
use crate::models::{ApiResponse, payments::requests::PaymentListQuery};
use crate::utils::error_response;

pub async fn list_payments(
    service: &PaymentService,
    query: PaymentListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_payments_with_pagination(query).await {
        Ok(payments) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            payments,
            "Payment list retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
