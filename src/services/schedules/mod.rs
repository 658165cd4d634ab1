pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::schedules::entities::Schedule;
use crate::models::schedules::requests::{
    CreateScheduleRequest, ScheduleListQuery, UpdateScheduleRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct ScheduleService {
    storage: Option<Arc<dyn Storage>>,
}

impl ScheduleService {
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

    pub async fn list_schedules(
        &self,
        query: ScheduleListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_schedules(self, query, request).await
    }

    pub async fn create_schedule(
        &self,
        schedule: CreateScheduleRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_schedule(self, schedule, request).await
    }

    pub async fn get_schedule(
        &self,
        schedule_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_schedule(self, schedule_id, request).await
    }

    pub async fn update_schedule(
        &self,
        schedule_id: i64,
        update: UpdateScheduleRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_schedule(self, schedule_id, update, request).await
    }

    pub async fn delete_schedule(
        &self,
        schedule_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_schedule(self, schedule_id, request).await
    }
}

fn schedule_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::ScheduleNotFound,
        "Schedule not found",
    ))
}

// 冲突时返回占用该时段的课表
fn schedule_conflict(existing: Schedule) -> HttpResponse {
    let message = format!(
        "Schedule conflicts with {} {}-{} in room {}",
        existing.day_of_week, existing.start_time, existing.end_time, existing.room
    );
    HttpResponse::Conflict().json(ApiResponse::error(
        ErrorCode::ScheduleConflict,
        existing,
        message,
    ))
}
