pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::academic_years::requests::{
    AcademicYearListQuery, CreateAcademicYearRequest, UpdateAcademicYearRequest,
};
use crate::storage::Storage;

pub struct AcademicYearService {
    storage: Option<Arc<dyn Storage>>,
}

impl AcademicYearService {
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

    // 学年列表（按年份倒序）
    pub async fn list_academic_years(
        &self,
        query: AcademicYearListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_academic_years(self, query, request).await
    }

    // 创建学年
    pub async fn create_academic_year(
        &self,
        year: CreateAcademicYearRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_academic_year(self, year, request).await
    }

    // 学年详情
    pub async fn get_academic_year(
        &self,
        year_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_academic_year(self, year_id, request).await
    }

    // 当前学年
    pub async fn get_current_academic_year(
        &self,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_current_academic_year(self, request).await
    }

    // 更新学年
    pub async fn update_academic_year(
        &self,
        year_id: i64,
        update: UpdateAcademicYearRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_academic_year(self, year_id, update, request).await
    }

    // 设为当前学年
    pub async fn set_current_academic_year(
        &self,
        year_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::set_current_academic_year(self, year_id, request).await
    }

    // 删除学年
    pub async fn delete_academic_year(
        &self,
        year_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_academic_year(self, year_id, request).await
    }
}
