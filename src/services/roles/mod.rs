pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod permissions;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::SyncIdsRequest;
use crate::models::roles::requests::{CreateRoleRequest, RoleListQuery, UpdateRoleRequest};
use crate::models::users::entities::UserRole;
use crate::storage::Storage;

/// 内置角色不能删除或改名
pub(crate) fn is_builtin_role(name: &str) -> bool {
    name.parse::<UserRole>().is_ok()
}

pub struct RoleService {
    storage: Option<Arc<dyn Storage>>,
}

impl RoleService {
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

    // 角色列表
    pub async fn list_roles(
        &self,
        query: RoleListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_roles(self, query, request).await
    }

    // 创建角色
    pub async fn create_role(
        &self,
        role: CreateRoleRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_role(self, role, request).await
    }

    // 角色详情
    pub async fn get_role(&self, role_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_role(self, role_id, request).await
    }

    // 更新角色
    pub async fn update_role(
        &self,
        role_id: i64,
        update: UpdateRoleRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_role(self, role_id, update, request).await
    }

    // 同步角色权限
    pub async fn sync_permissions(
        &self,
        role_id: i64,
        ids: SyncIdsRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        permissions::sync_permissions(self, role_id, ids, request).await
    }

    // 删除角色
    pub async fn delete_role(
        &self,
        role_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_role(self, role_id, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_roles() {
        for name in ["admin", "teacher", "student", "accountant"] {
            assert!(is_builtin_role(name));
        }
        assert!(!is_builtin_role("librarian"));
        assert!(!is_builtin_role("Admin"));
    }
}
