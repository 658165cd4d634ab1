pub mod create;
pub mod delete;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::roles::requests::{
    CreatePermissionRequest, RoleListQuery, UpdatePermissionRequest,
};
use crate::storage::Storage;

pub struct PermissionService {
    storage: Option<Arc<dyn Storage>>,
}

impl PermissionService {
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

    // 权限列表
    pub async fn list_permissions(
        &self,
        query: RoleListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_permissions(self, query, request).await
    }

    // 创建权限
    pub async fn create_permission(
        &self,
        permission: CreatePermissionRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_permission(self, permission, request).await
    }

    // 更新权限
    pub async fn update_permission(
        &self,
        permission_id: i64,
        update: UpdatePermissionRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_permission(self, permission_id, update, request).await
    }

    // 删除权限
    pub async fn delete_permission(
        &self,
        permission_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_permission(self, permission_id, request).await
    }
}
