pub mod aggregate;
pub mod create;
pub mod delete;
pub mod download;
pub mod get;
pub mod list;
pub mod options;
pub mod queue;
pub mod workbook;

pub use queue::{ReportQueue, requeue_pending_reports, spawn_report_worker};

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use std::sync::Arc;

use crate::models::reports::requests::{CreateReportRequest, ReportListQuery};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct ReportService {
    storage: Option<Arc<dyn Storage>>,
}

impl ReportService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub(crate) fn get_queue(&self, request: &HttpRequest) -> ReportQueue {
        request
            .app_data::<web::Data<ReportQueue>>()
            .expect("Report queue not found in app data")
            .get_ref()
            .clone()
    }

    pub async fn list_reports(
        &self,
        query: ReportListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_reports(self, query, request).await
    }

    // 创建表单所需的学年与报表类型
    pub async fn get_options(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        options::get_options(self, request).await
    }

    pub async fn create_report(
        &self,
        report: CreateReportRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_report(self, report, request).await
    }

    pub async fn get_report(
        &self,
        report_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_report(self, report_id, request).await
    }

    pub async fn download_report(
        &self,
        report_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        download::download_report(self, report_id, request).await
    }

    pub async fn delete_report(
        &self,
        report_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_report(self, report_id, request).await
    }
}

fn report_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::ReportNotFound,
        "Report not found",
    ))
}
