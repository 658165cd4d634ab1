use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ScheduleService, schedule_conflict};
use crate::models::{
    ApiResponse, ErrorCode,
    schedules::{entities::ScheduleOutcome, requests::CreateScheduleRequest},
};
use crate::utils::error_response;
use crate::utils::validate::{validate_required, validate_time_range};

pub async fn create_schedule(
    service: &ScheduleService,
    mut schedule: CreateScheduleRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    schedule.room = schedule.room.trim().to_string();

    let checked = validate_time_range(&schedule.start_time, &schedule.end_time)
        .map_err(String::from)
        .and_then(|_| validate_required("room", &schedule.room));
    if let Err(msg) = checked {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    let storage = service.get_storage(request);

    match storage.create_schedule(schedule).await {
        Ok(ScheduleOutcome::Saved(schedule)) => Ok(HttpResponse::Created().json(
            ApiResponse::success(schedule, "Schedule created successfully"),
        )),
        Ok(ScheduleOutcome::Conflict(existing)) => Ok(schedule_conflict(existing)),
        Err(e) => Ok(error_response(&e)),
    }
}
