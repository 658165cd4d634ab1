use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{SubjectService, subject_not_found};
use crate::models::{ApiResponse, SyncIdsRequest};
use crate::utils::error_response;

pub async fn sync_teachers(
    service: &SubjectService,
    subject_id: i64,
    ids: SyncIdsRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.sync_subject_teachers(subject_id, ids.ids).await {
        Ok(Some(subject)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            subject,
            "Subject teachers updated successfully",
        ))),
        Ok(None) => Ok(subject_not_found()),
        Err(e) => Ok(error_response(&e)),
    }
}
