use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{TeacherService, teacher_not_found};
use crate::models::{ApiResponse, SyncIdsRequest};
use crate::utils::error_response;

pub async fn list_schedules(
    service: &TeacherService,
    teacher_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_teacher_by_id(teacher_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(teacher_not_found()),
        Err(e) => return Ok(error_response(&e)),
    }

    match storage.list_teacher_schedules(teacher_id).await {
        Ok(schedules) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            schedules,
            "Teacher schedules retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn list_subjects(
    service: &TeacherService,
    teacher_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_teacher_by_id(teacher_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(teacher_not_found()),
        Err(e) => return Ok(error_response(&e)),
    }

    match storage.list_teacher_subjects(teacher_id).await {
        Ok(subjects) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            subjects,
            "Teacher subjects retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn sync_subjects(
    service: &TeacherService,
    teacher_id: i64,
    ids: SyncIdsRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.sync_teacher_subjects(teacher_id, ids.ids).await {
        Ok(Some(subjects)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            subjects,
            "Teacher subjects updated successfully",
        ))),
        Ok(None) => Ok(teacher_not_found()),
        Err(e) => Ok(error_response(&e)),
    }
}
