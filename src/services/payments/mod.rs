pub mod create;
pub mod delete;
pub mod get;
pub mod invoice;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::payments::requests::{
    CreatePaymentRequest, PaymentDetailInput, PaymentListQuery, UpdatePaymentRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;
use crate::utils::validate::validate_required;

pub struct PaymentService {
    storage: Option<Arc<dyn Storage>>,
}

impl PaymentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub async fn list_payments(
        &self,
        query: PaymentListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_payments(self, query, request).await
    }

    pub async fn create_payment(
        &self,
        payment: CreatePaymentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_payment(self, payment, request).await
    }

    pub async fn get_payment(
        &self,
        payment_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_payment(self, payment_id, request).await
    }

    pub async fn update_payment(
        &self,
        payment_id: i64,
        update: UpdatePaymentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_payment(self, payment_id, update, request).await
    }

    pub async fn delete_payment(
        &self,
        payment_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_payment(self, payment_id, request).await
    }

    // 发票
    pub async fn get_invoice(
        &self,
        payment_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        invoice::get_invoice(self, payment_id, request).await
    }
}

fn payment_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::PaymentNotFound,
        "Payment not found",
    ))
}

fn validation_failed(msg: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg))
}

// 金额与明细合计的校验在存储层完成，这里只检查文本字段
fn validate_details(details: &[PaymentDetailInput]) -> Result<(), String> {
    details
        .iter()
        .try_for_each(|detail| validate_required("fee_type", &detail.fee_type))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_details() {
        let detail = |fee_type: &str| PaymentDetailInput {
            fee_type: fee_type.into(),
            amount: 100.0,
            description: None,
        };
        assert!(validate_details(&[]).is_ok());
        assert!(validate_details(&[detail("tuition"), detail("transport")]).is_ok());
        assert!(validate_details(&[detail("tuition"), detail(" ")]).is_err());
    }
}
