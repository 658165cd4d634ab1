//! 学生名下的选课、成绩与缴费记录

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::{StudentService, authorize_student_access, student_not_found};
use crate::models::{
    ApiResponse, PaginationQuery, enrollments::requests::EnrollmentListQuery,
    grades::requests::GradeListQuery, payments::requests::PaymentListQuery,
};
use crate::storage::Storage;
use crate::utils::error_response;

// 权限与存在性检查
async fn ensure_readable(
    storage: &Arc<dyn Storage>,
    request: &HttpRequest,
    student_id: i64,
) -> Result<(), HttpResponse> {
    authorize_student_access(storage, request, student_id).await?;
    match storage.get_student_by_id(student_id).await {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(student_not_found()),
        Err(e) => Err(error_response(&e)),
    }
}

pub async fn list_enrollments(
    service: &StudentService,
    student_id: i64,
    query: PaginationQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    if let Err(resp) = ensure_readable(&storage, request, student_id).await {
        return Ok(resp);
    }

    let query = EnrollmentListQuery {
        page: Some(query.page),
        size: Some(query.size),
        student_id: Some(student_id),
        ..Default::default()
    };

    match storage.list_enrollments_with_pagination(query).await {
        Ok(enrollments) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            enrollments,
            "Student enrollments retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn list_grades(
    service: &StudentService,
    student_id: i64,
    query: PaginationQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    if let Err(resp) = ensure_readable(&storage, request, student_id).await {
        return Ok(resp);
    }

    let query = GradeListQuery {
        page: Some(query.page),
        size: Some(query.size),
        student_id: Some(student_id),
        ..Default::default()
    };

    match storage.list_grades_with_pagination(query).await {
        Ok(grades) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            grades,
            "Student grades retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn list_payments(
    service: &StudentService,
    student_id: i64,
    query: PaginationQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    if let Err(resp) = ensure_readable(&storage, request, student_id).await {
        return Ok(resp);
    }

    let query = PaymentListQuery {
        page: Some(query.page),
        size: Some(query.size),
        student_id: Some(student_id),
        ..Default::default()
    };

    match storage.list_payments_with_pagination(query).await {
        Ok(payments) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            payments,
            "Student payments retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
