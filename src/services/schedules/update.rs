use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ScheduleService, schedule_conflict, schedule_not_found};
use crate::models::{
    ApiResponse, ErrorCode,
    schedules::{entities::ScheduleOutcome, requests::UpdateScheduleRequest},
};
use crate::utils::error_response;
use crate::utils::validate::{validate_required, validate_time, validate_time_range};

fn validate_schedule_update(update: &UpdateScheduleRequest) -> Result<(), String> {
    match (&update.start_time, &update.end_time) {
        (Some(start), Some(end)) => validate_time_range(start, end)?,
        (Some(time), None) | (None, Some(time)) => validate_time(time)?,
        (None, None) => {}
    }
    if let Some(room) = &update.room {
        validate_required("room", room)?;
    }
    Ok(())
}

pub async fn update_schedule(
    service: &ScheduleService,
    schedule_id: i64,
    update: UpdateScheduleRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_schedule_update(&update) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    let storage = service.get_storage(request);

    // 只改一端时，与已有的另一端组合后再校验
    if update.start_time.is_some() != update.end_time.is_some() {
        let existing = match storage.get_schedule_by_id(schedule_id).await {
            Ok(Some(existing)) => existing,
            Ok(None) => return Ok(schedule_not_found()),
            Err(e) => return Ok(error_response(&e)),
        };
        let start = update.start_time.as_deref().unwrap_or(&existing.start_time);
        let end = update.end_time.as_deref().unwrap_or(&existing.end_time);
        if let Err(msg) = validate_time_range(start, end) {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
        }
    }

    match storage.update_schedule(schedule_id, update).await {
        Ok(Some(ScheduleOutcome::Saved(schedule))) => Ok(HttpResponse::Ok().json(
            ApiResponse::success(schedule, "Schedule updated successfully"),
        )),
        Ok(Some(ScheduleOutcome::Conflict(existing))) => Ok(schedule_conflict(existing)),
        Ok(None) => Ok(schedule_not_found()),
        Err(e) => Ok(error_response(&e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_schedule_update() {
        assert!(validate_schedule_update(&UpdateScheduleRequest::default()).is_ok());
        assert!(
            validate_schedule_update(&UpdateScheduleRequest {
                start_time: Some("10:00".into()),
                end_time: Some("09:00".into()),
                ..Default::default()
            })
            .is_err()
        );
        assert!(
            validate_schedule_update(&UpdateScheduleRequest {
                end_time: Some("25:00".into()),
                ..Default::default()
            })
            .is_err()
        );
        assert!(
            validate_schedule_update(&UpdateScheduleRequest {
                start_time: Some("08:00".into()),
                end_time: Some("10:00".into()),
                room: Some("B12".into()),
                ..Default::default()
            })
            .is_ok()
        );
    }
}
