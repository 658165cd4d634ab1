use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ScheduleService;
use crate::models::{ApiResponse, schedules::requests::ScheduleListQuery};
use crate::utils::error_response;

pub async fn list_schedules(
    service: &ScheduleService,
    query: ScheduleListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_schedules_with_pagination(query).await {
        Ok(schedules) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            schedules,
            "Schedule list retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
