use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ScheduleService, schedule_not_found};
use crate::models::ApiResponse;
use crate::utils::error_response;

pub async fn delete_schedule(
    service: &ScheduleService,
    schedule_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_schedule(schedule_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Schedule deleted successfully",
        ))),
        Ok(false) => Ok(schedule_not_found()),
        Err(e) => Ok(error_response(&e)),
    }
}
