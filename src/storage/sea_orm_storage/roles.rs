//! 角色与权限存储操作

use std::collections::BTreeSet;

use super::{SeaOrmStorage, classify_write_error, soft_delete};
use crate::entity::permissions::{
    ActiveModel as PermissionActiveModel, Column as PermissionColumn, Entity as Permissions,
};
use crate::entity::prelude::{RolePermissionActiveModel, RolePermissions, UserRoles};
use crate::entity::roles::{ActiveModel, Column, Entity as Roles, Model};
use crate::entity::{role_permissions, user_roles};
use crate::errors::{Result, SchoolError};
use crate::models::{
    PaginatedResponse, PaginationInfo,
    roles::{
        entities::{Permission, Role},
        requests::{
            CreatePermissionRequest, CreateRoleRequest, RoleListQuery, UpdatePermissionRequest,
            UpdateRoleRequest,
        },
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建角色
    pub async fn create_role_impl(&self, req: CreateRoleRequest) -> Result<Role> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolError::database_operation(format!("开启事务失败: {e}")))?;

        let role = ActiveModel {
            name: Set(req.name),
            description: Set(req.description),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| classify_write_error("创建角色", e))?;

        replace_role_permissions(&txn, role.id, &req.permissions).await?;

        txn.commit()
            .await
            .map_err(|e| SchoolError::database_operation(format!("提交事务失败: {e}")))?;

        self.load_role(role).await
    }

    /// 通过 ID 获取角色
    pub async fn get_role_by_id_impl(&self, id: i64) -> Result<Option<Role>> {
        let result = Roles::find_by_id(id)
            .filter(Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询角色失败: {e}")))?;

        match result {
            Some(model) => Ok(Some(self.load_role(model).await?)),
            None => Ok(None),
        }
    }

    /// 分页列出角色
    pub async fn list_roles_with_pagination_impl(
        &self,
        query: RoleListQuery,
    ) -> Result<PaginatedResponse<Role>> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Roles::find().filter(Column::DeletedAt.is_null());

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            select = select.filter(Column::Name.contains(escape_like_pattern(search.trim())));
        }

        let paginator = select.order_by_asc(Column::Name).paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询角色总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询角色页数失败: {e}")))?;
        let models = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询角色列表失败: {e}")))?;

        let mut items = Vec::with_capacity(models.len());
        for model in models {
            items.push(self.load_role(model).await?);
        }

        Ok(PaginatedResponse {
            items,
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 更新角色
    pub async fn update_role_impl(&self, id: i64, update: UpdateRoleRequest) -> Result<Option<Role>> {
        if self.get_role_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };
        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| classify_write_error("更新角色", e))?;

        self.get_role_by_id_impl(id).await
    }

    /// 同步角色权限
    pub async fn sync_role_permissions_impl(
        &self,
        id: i64,
        permission_ids: Vec<i64>,
    ) -> Result<Option<Role>> {
        if self.get_role_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolError::database_operation(format!("开启事务失败: {e}")))?;

        replace_role_permissions(&txn, id, &permission_ids).await?;

        txn.commit()
            .await
            .map_err(|e| SchoolError::database_operation(format!("提交事务失败: {e}")))?;

        self.get_role_by_id_impl(id).await
    }

    /// 软删除角色并解除关联
    pub async fn delete_role_impl(&self, id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolError::database_operation(format!("开启事务失败: {e}")))?;

        let deleted = soft_delete::<Roles, _>(&txn, id)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除角色失败: {e}")))?;

        if deleted {
            RolePermissions::delete_many()
                .filter(role_permissions::Column::RoleId.eq(id))
                .exec(&txn)
                .await
                .map_err(|e| SchoolError::database_operation(format!("解除角色权限失败: {e}")))?;
            UserRoles::delete_many()
                .filter(user_roles::Column::RoleId.eq(id))
                .exec(&txn)
                .await
                .map_err(|e| SchoolError::database_operation(format!("解除用户角色失败: {e}")))?;
        }

        txn.commit()
            .await
            .map_err(|e| SchoolError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(deleted)
    }

    /// 确保角色存在，并补齐缺失的权限
    pub async fn ensure_role_impl(&self, name: &str, permission_slugs: &[&str]) -> Result<Role> {
        let existing = Roles::find()
            .filter(Column::Name.eq(name))
            .filter(Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询角色失败: {e}")))?;

        let role = match existing {
            Some(role) => role,
            None => {
                let now = chrono::Utc::now().timestamp();
                ActiveModel {
                    name: Set(name.to_string()),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                }
                .insert(&self.db)
                .await
                .map_err(|e| classify_write_error("创建角色", e))?
            }
        };

        let wanted = Permissions::find()
            .filter(PermissionColumn::Slug.is_in(permission_slugs.iter().copied()))
            .filter(PermissionColumn::DeletedAt.is_null())
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询权限失败: {e}")))?;

        let granted: BTreeSet<i64> = RolePermissions::find()
            .filter(role_permissions::Column::RoleId.eq(role.id))
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询角色权限失败: {e}")))?
            .into_iter()
            .map(|g| g.permission_id)
            .collect();

        let now = chrono::Utc::now().timestamp();
        for permission in wanted.iter().filter(|p| !granted.contains(&p.id)) {
            RolePermissionActiveModel {
                role_id: Set(role.id),
                permission_id: Set(permission.id),
                created_at: Set(now),
            }
            .insert(&self.db)
            .await
            .map_err(|e| classify_write_error("分配角色权限", e))?;
        }

        self.load_role(role).await
    }

    /// 创建权限
    pub async fn create_permission_impl(&self, req: CreatePermissionRequest) -> Result<Permission> {
        let now = chrono::Utc::now().timestamp();

        let result = PermissionActiveModel {
            name: Set(req.name),
            slug: Set(req.slug),
            description: Set(req.description),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| classify_write_error("创建权限", e))?;

        Ok(result.into_permission())
    }

    /// 分页列出权限
    pub async fn list_permissions_with_pagination_impl(
        &self,
        query: RoleListQuery,
    ) -> Result<PaginatedResponse<Permission>> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Permissions::find().filter(PermissionColumn::DeletedAt.is_null());

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(PermissionColumn::Name.contains(&escaped))
                    .add(PermissionColumn::Slug.contains(&escaped)),
            );
        }

        let paginator = select
            .order_by_asc(PermissionColumn::Slug)
            .paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询权限总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询权限页数失败: {e}")))?;
        let models = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询权限列表失败: {e}")))?;

        Ok(PaginatedResponse {
            items: models.into_iter().map(|m| m.into_permission()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 更新权限
    pub async fn update_permission_impl(
        &self,
        id: i64,
        update: UpdatePermissionRequest,
    ) -> Result<Option<Permission>> {
        let existing = Permissions::find_by_id(id)
            .filter(PermissionColumn::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询权限失败: {e}")))?;
        if existing.is_none() {
            return Ok(None);
        }

        let mut model = PermissionActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };
        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(slug) = update.slug {
            model.slug = Set(slug);
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| classify_write_error("更新权限", e))?;

        Ok(Some(result.into_permission()))
    }

    /// 软删除权限并解除角色关联
    pub async fn delete_permission_impl(&self, id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolError::database_operation(format!("开启事务失败: {e}")))?;

        let deleted = soft_delete::<Permissions, _>(&txn, id)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除权限失败: {e}")))?;

        if deleted {
            RolePermissions::delete_many()
                .filter(role_permissions::Column::PermissionId.eq(id))
                .exec(&txn)
                .await
                .map_err(|e| SchoolError::database_operation(format!("解除角色权限失败: {e}")))?;
        }

        txn.commit()
            .await
            .map_err(|e| SchoolError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(deleted)
    }

    /// 确保权限存在
    pub async fn ensure_permission_impl(&self, slug: &str, name: &str) -> Result<Permission> {
        let existing = Permissions::find()
            .filter(PermissionColumn::Slug.eq(slug))
            .filter(PermissionColumn::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询权限失败: {e}")))?;

        match existing {
            Some(model) => Ok(model.into_permission()),
            None => {
                self.create_permission_impl(CreatePermissionRequest {
                    name: name.to_string(),
                    slug: slug.to_string(),
                    description: None,
                })
                .await
            }
        }
    }

    /// 加载角色的权限列表
    async fn load_role(&self, model: Model) -> Result<Role> {
        let permission_ids: Vec<i64> = RolePermissions::find()
            .filter(role_permissions::Column::RoleId.eq(model.id))
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询角色权限失败: {e}")))?
            .into_iter()
            .map(|g| g.permission_id)
            .collect();

        let permissions = Permissions::find()
            .filter(PermissionColumn::Id.is_in(permission_ids))
            .filter(PermissionColumn::DeletedAt.is_null())
            .order_by_asc(PermissionColumn::Slug)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询权限失败: {e}")))?;

        Ok(model.into_role(permissions.into_iter().map(|p| p.into_permission()).collect()))
    }
}

/// 用给定权限替换角色的全部权限
async fn replace_role_permissions<C: ConnectionTrait>(
    conn: &C,
    role_id: i64,
    permission_ids: &[i64],
) -> Result<()> {
    let unique: BTreeSet<i64> = permission_ids.iter().copied().collect();

    let found = Permissions::find()
        .filter(PermissionColumn::Id.is_in(unique.iter().copied()))
        .filter(PermissionColumn::DeletedAt.is_null())
        .count(conn)
        .await
        .map_err(|e| SchoolError::database_operation(format!("查询权限失败: {e}")))?;
    if found as usize != unique.len() {
        return Err(SchoolError::validation("包含不存在的权限"));
    }

    RolePermissions::delete_many()
        .filter(role_permissions::Column::RoleId.eq(role_id))
        .exec(conn)
        .await
        .map_err(|e| SchoolError::database_operation(format!("清除角色权限失败: {e}")))?;

    let now = chrono::Utc::now().timestamp();
    for permission_id in unique {
        RolePermissionActiveModel {
            role_id: Set(role_id),
            permission_id: Set(permission_id),
            created_at: Set(now),
        }
        .insert(conn)
        .await
        .map_err(|e| classify_write_error("分配角色权限", e))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::test_support::memory_storage;
    use crate::errors::SchoolError;
    use crate::models::roles::requests::{CreateRoleRequest, RoleListQuery};

    #[tokio::test]
    async fn test_ensure_role_is_idempotent() {
        let storage = memory_storage().await;
        storage.ensure_permission_impl("reports.view", "View reports").await.unwrap();
        storage.ensure_permission_impl("reports.view", "View reports").await.unwrap();

        let first = storage.ensure_role_impl("accountant", &["reports.view"]).await.unwrap();
        let second = storage.ensure_role_impl("accountant", &["reports.view"]).await.unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(second.permissions.len(), 1);
    }

    #[tokio::test]
    async fn test_role_with_unknown_permission_rejected() {
        let storage = memory_storage().await;
        let err = storage
            .create_role_impl(CreateRoleRequest {
                name: "librarian".into(),
                description: None,
                permissions: vec![999],
            })
            .await
            .unwrap_err();
        assert!(matches!(err, SchoolError::Validation(_)));

        let page = storage
            .list_roles_with_pagination_impl(RoleListQuery::default())
            .await
            .unwrap();
        assert_eq!(page.pagination.total, 0);
    }

    #[tokio::test]
    async fn test_deleting_permission_detaches_it() {
        let storage = memory_storage().await;
        let permission = storage.ensure_permission_impl("users.manage", "Manage users").await.unwrap();
        let role = storage.ensure_role_impl("admin", &["users.manage"]).await.unwrap();
        assert_eq!(role.permissions.len(), 1);

        assert!(storage.delete_permission_impl(permission.id).await.unwrap());
        let role = storage.get_role_by_id_impl(role.id).await.unwrap().unwrap();
        assert!(role.permissions.is_empty());

        let err = storage
            .create_role_impl(CreateRoleRequest {
                name: "admin".into(),
                description: None,
                permissions: vec![],
            })
            .await
            .unwrap_err();
        assert!(matches!(err, SchoolError::Conflict(_)));
    }
}
