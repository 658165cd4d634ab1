use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ScheduleService, schedule_not_found};
use crate::models::ApiResponse;
use crate::utils::error_response;

pub async fn get_schedule(
    service: &ScheduleService,
    schedule_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_schedule_by_id(schedule_id).await {
        Ok(Some(schedule)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            schedule,
            "Schedule retrieved successfully",
        ))),
        Ok(None) => Ok(schedule_not_found()),
        Err(e) => Ok(error_response(&e)),
    }
}
