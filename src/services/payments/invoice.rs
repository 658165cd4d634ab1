use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{PaymentService, payment_not_found};
use crate::errors::SchoolError;
use crate::models::{ApiResponse, payments::responses::Invoice};
use crate::utils::error_response;

pub async fn get_invoice(
    service: &PaymentService,
    payment_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let payment = match storage.get_payment_by_id(payment_id).await {
        Ok(Some(payment)) => payment,
        Ok(None) => return Ok(payment_not_found()),
        Err(e) => return Ok(error_response(&e)),
    };

    // 外键约束保证关联存在，缺失视为数据异常
    let student = match storage.get_student_by_id(payment.student_id).await {
        Ok(Some(student)) => student,
        Ok(None) => {
            return Ok(error_response(&SchoolError::not_found(format!(
                "Student {} of payment {} not found",
                payment.student_id, payment.id
            ))));
        }
        Err(e) => return Ok(error_response(&e)),
    };
    let academic_year = match storage.get_academic_year_by_id(payment.academic_year_id).await {
        Ok(Some(year)) => year,
        Ok(None) => {
            return Ok(error_response(&SchoolError::not_found(format!(
                "Academic year {} of payment {} not found",
                payment.academic_year_id, payment.id
            ))));
        }
        Err(e) => return Ok(error_response(&e)),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        Invoice::build(payment, student, academic_year),
        "Invoice generated successfully",
    )))
}
