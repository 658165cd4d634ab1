use std::collections::{BTreeSet, HashMap};

use super::{SeaOrmStorage, classify_write_error, soft_delete};
use crate::entity::prelude::{Permissions, RolePermissions, Roles, UserRoleActiveModel, UserRoles};
use crate::entity::users::{ActiveModel, Column, Entity as Users, Model};
use crate::entity::{permissions, role_permissions, roles, user_roles};
use crate::errors::{Result, SchoolError};
use crate::models::{
    PaginatedResponse, PaginationInfo,
    users::{
        entities::{User, UserStatus},
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
    },
};
use crate::utils::{convert::format_date, escape_like_pattern};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建用户
    pub async fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolError::database_operation(format!("开启事务失败: {e}")))?;

        let model = ActiveModel {
            first_name: Set(req.first_name),
            last_name: Set(req.last_name),
            email: Set(req.email),
            password_hash: Set(req.password),
            phone: Set(req.phone),
            address: Set(req.address),
            city: Set(req.city),
            country: Set(req.country),
            gender: Set(req.gender),
            birth_date: Set(format_date(req.birth_date)),
            photo: Set(req.photo),
            status: Set(req.status.unwrap_or(UserStatus::Active).to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&txn)
            .await
            .map_err(|e| classify_write_error("创建用户", e))?;

        replace_user_roles(&txn, result.id, &req.roles).await?;

        txn.commit()
            .await
            .map_err(|e| SchoolError::database_operation(format!("提交事务失败: {e}")))?;

        self.get_user_by_id_impl(result.id)
            .await?
            .ok_or_else(|| SchoolError::database_operation("创建用户后读取失败"))
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .filter(Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询用户失败: {e}")))?;

        match result {
            Some(model) => Ok(self.hydrate_users(vec![model]).await?.pop()),
            None => Ok(None),
        }
    }

    /// 通过邮箱获取用户
    pub async fn get_user_by_email_impl(&self, email: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Email.eq(email))
            .filter(Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询用户失败: {e}")))?;

        match result {
            Some(model) => Ok(self.hydrate_users(vec![model]).await?.pop()),
            None => Ok(None),
        }
    }

    /// 分页列出用户
    pub async fn list_users_with_pagination_impl(
        &self,
        query: UserListQuery,
    ) -> Result<PaginatedResponse<User>> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Users::find().filter(Column::DeletedAt.is_null());

        // 搜索条件
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::FirstName.contains(&escaped))
                    .add(Column::LastName.contains(&escaped))
                    .add(Column::Email.contains(&escaped)),
            );
        }

        // 状态筛选
        if let Some(ref status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        // 角色筛选
        if let Some(ref role) = query.role
            && !role.trim().is_empty()
        {
            let user_ids = self.user_ids_with_role(role.trim()).await?;
            select = select.filter(Column::Id.is_in(user_ids));
        }

        select = select.order_by_desc(Column::CreatedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询用户总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询用户页数失败: {e}")))?;

        let users = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询用户列表失败: {e}")))?;

        Ok(PaginatedResponse {
            items: self.hydrate_users(users).await?,
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 更新用户最后登录时间
    pub async fn update_last_login_impl(&self, id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Users::update_many()
            .col_expr(Column::LastLoginAt, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(id))
            .filter(Column::DeletedAt.is_null())
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("更新最后登录时间失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 更新用户信息
    pub async fn update_user_impl(
        &self,
        id: i64,
        update: UpdateUserRequest,
    ) -> Result<Option<User>> {
        // 先检查用户是否存在
        let existing = self.get_user_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(first_name) = update.first_name {
            model.first_name = Set(first_name);
        }
        if let Some(last_name) = update.last_name {
            model.last_name = Set(last_name);
        }
        if let Some(email) = update.email {
            model.email = Set(email);
        }
        if let Some(password) = update.password {
            model.password_hash = Set(password);
        }
        if let Some(phone) = update.phone {
            model.phone = Set(phone);
        }
        if let Some(address) = update.address {
            model.address = Set(address);
        }
        if let Some(city) = update.city {
            model.city = Set(city);
        }
        if let Some(country) = update.country {
            model.country = Set(country);
        }
        if let Some(gender) = update.gender {
            model.gender = Set(gender);
        }
        if let Some(birth_date) = update.birth_date {
            model.birth_date = Set(format_date(birth_date));
        }
        if let Some(photo) = update.photo {
            model.photo = Set(Some(photo));
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolError::database_operation(format!("开启事务失败: {e}")))?;

        model
            .update(&txn)
            .await
            .map_err(|e| classify_write_error("更新用户", e))?;

        if let Some(roles) = update.roles {
            replace_user_roles(&txn, id, &roles).await?;
        }

        txn.commit()
            .await
            .map_err(|e| SchoolError::database_operation(format!("提交事务失败: {e}")))?;

        self.get_user_by_id_impl(id).await
    }

    /// 同步用户角色
    pub async fn sync_user_roles_impl(&self, id: i64, roles: Vec<String>) -> Result<Option<User>> {
        if self.get_user_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolError::database_operation(format!("开启事务失败: {e}")))?;

        replace_user_roles(&txn, id, &roles).await?;

        txn.commit()
            .await
            .map_err(|e| SchoolError::database_operation(format!("提交事务失败: {e}")))?;

        self.get_user_by_id_impl(id).await
    }

    /// 软删除用户并解除角色关联
    pub async fn delete_user_impl(&self, id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolError::database_operation(format!("开启事务失败: {e}")))?;

        let deleted = soft_delete::<Users, _>(&txn, id)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除用户失败: {e}")))?;

        if deleted {
            UserRoles::delete_many()
                .filter(user_roles::Column::UserId.eq(id))
                .exec(&txn)
                .await
                .map_err(|e| SchoolError::database_operation(format!("解除用户角色失败: {e}")))?;
        }

        txn.commit()
            .await
            .map_err(|e| SchoolError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(deleted)
    }

    /// 统计用户数量
    pub async fn count_users_impl(&self) -> Result<u64> {
        let count = Users::find()
            .filter(Column::DeletedAt.is_null())
            .count(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("统计用户数量失败: {e}")))?;

        Ok(count)
    }

    /// 拥有指定角色的用户 ID
    async fn user_ids_with_role(&self, role: &str) -> Result<Vec<i64>> {
        let role = Roles::find()
            .filter(roles::Column::Name.eq(role))
            .filter(roles::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询角色失败: {e}")))?;

        let Some(role) = role else {
            return Ok(vec![]);
        };

        let links = UserRoles::find()
            .filter(user_roles::Column::RoleId.eq(role.id))
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询用户角色失败: {e}")))?;

        Ok(links.into_iter().map(|l| l.user_id).collect())
    }

    /// 批量补全用户的角色名与权限 slug
    pub(crate) async fn hydrate_users(&self, models: Vec<Model>) -> Result<Vec<User>> {
        if models.is_empty() {
            return Ok(vec![]);
        }
        let user_ids: Vec<i64> = models.iter().map(|m| m.id).collect();

        let links = UserRoles::find()
            .filter(user_roles::Column::UserId.is_in(user_ids))
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询用户角色失败: {e}")))?;

        let role_ids: BTreeSet<i64> = links.iter().map(|l| l.role_id).collect();
        let roles = Roles::find()
            .filter(roles::Column::Id.is_in(role_ids.iter().copied()))
            .filter(roles::Column::DeletedAt.is_null())
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询角色失败: {e}")))?;
        let role_names: HashMap<i64, String> = roles.into_iter().map(|r| (r.id, r.name)).collect();

        let grants = RolePermissions::find()
            .filter(role_permissions::Column::RoleId.is_in(role_names.keys().copied()))
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询角色权限失败: {e}")))?;

        let permission_ids: BTreeSet<i64> = grants.iter().map(|g| g.permission_id).collect();
        let permissions = Permissions::find()
            .filter(permissions::Column::Id.is_in(permission_ids.iter().copied()))
            .filter(permissions::Column::DeletedAt.is_null())
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询权限失败: {e}")))?;
        let slugs: HashMap<i64, String> = permissions.into_iter().map(|p| (p.id, p.slug)).collect();

        let users = models
            .into_iter()
            .map(|model| {
                let user_role_ids: Vec<i64> = links
                    .iter()
                    .filter(|l| l.user_id == model.id && role_names.contains_key(&l.role_id))
                    .map(|l| l.role_id)
                    .collect();

                let mut names: Vec<String> = user_role_ids
                    .iter()
                    .filter_map(|id| role_names.get(id).cloned())
                    .collect();
                names.sort();

                let granted: BTreeSet<String> = grants
                    .iter()
                    .filter(|g| user_role_ids.contains(&g.role_id))
                    .filter_map(|g| slugs.get(&g.permission_id).cloned())
                    .collect();

                model.into_user(names, granted.into_iter().collect())
            })
            .collect();

        Ok(users)
    }
}

/// 用给定角色名替换用户的全部角色
async fn replace_user_roles<C: ConnectionTrait>(
    conn: &C,
    user_id: i64,
    role_names: &[String],
) -> Result<()> {
    let roles = Roles::find()
        .filter(roles::Column::Name.is_in(role_names.iter().map(String::as_str)))
        .filter(roles::Column::DeletedAt.is_null())
        .all(conn)
        .await
        .map_err(|e| SchoolError::database_operation(format!("查询角色失败: {e}")))?;

    if let Some(missing) = role_names
        .iter()
        .find(|name| !roles.iter().any(|r| &r.name == *name))
    {
        return Err(SchoolError::validation(format!("角色不存在: {missing}")));
    }

    UserRoles::delete_many()
        .filter(user_roles::Column::UserId.eq(user_id))
        .exec(conn)
        .await
        .map_err(|e| SchoolError::database_operation(format!("清除用户角色失败: {e}")))?;

    let now = chrono::Utc::now().timestamp();
    for role in roles {
        UserRoleActiveModel {
            user_id: Set(user_id),
            role_id: Set(role.id),
            created_at: Set(now),
        }
        .insert(conn)
        .await
        .map_err(|e| classify_write_error("分配用户角色", e))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{memory_storage, user_request};
    use crate::errors::SchoolError;
    use crate::models::users::requests::{UpdateUserRequest, UserListQuery};

    #[tokio::test]
    async fn test_create_user_with_roles_and_permissions() {
        let storage = memory_storage().await;
        storage.ensure_permission_impl("grades.view", "View grades").await.unwrap();
        storage.ensure_role_impl("student", &["grades.view"]).await.unwrap();

        let user = storage
            .create_user_impl(user_request("awa@example.com", &["student"]))
            .await
            .unwrap();
        assert_eq!(user.roles, vec!["student".to_string()]);
        assert_eq!(user.permissions, vec!["grades.view".to_string()]);

        let found = storage.get_user_by_email_impl("awa@example.com").await.unwrap();
        assert_eq!(found.map(|u| u.id), Some(user.id));
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let storage = memory_storage().await;
        storage
            .create_user_impl(user_request("dup@example.com", &[]))
            .await
            .unwrap();
        let err = storage
            .create_user_impl(user_request("dup@example.com", &[]))
            .await
            .unwrap_err();
        assert!(matches!(err, SchoolError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_unknown_role_rejected() {
        let storage = memory_storage().await;
        let err = storage
            .create_user_impl(user_request("x@example.com", &["wizard"]))
            .await
            .unwrap_err();
        assert!(matches!(err, SchoolError::Validation(_)));
    }

    #[tokio::test]
    async fn test_soft_delete_hides_user() {
        let storage = memory_storage().await;
        storage.ensure_role_impl("teacher", &[]).await.unwrap();
        let user = storage
            .create_user_impl(user_request("gone@example.com", &["teacher"]))
            .await
            .unwrap();

        assert!(storage.delete_user_impl(user.id).await.unwrap());
        assert!(!storage.delete_user_impl(user.id).await.unwrap());
        assert!(storage.get_user_by_id_impl(user.id).await.unwrap().is_none());
        assert!(
            storage
                .update_user_impl(user.id, UpdateUserRequest::default())
                .await
                .unwrap()
                .is_none()
        );

        let page = storage
            .list_users_with_pagination_impl(UserListQuery::default())
            .await
            .unwrap();
        assert_eq!(page.pagination.total, 0);
    }

    #[tokio::test]
    async fn test_list_filters_by_role_and_search() {
        let storage = memory_storage().await;
        storage.ensure_role_impl("teacher", &[]).await.unwrap();
        storage
            .create_user_impl(user_request("teach@example.com", &["teacher"]))
            .await
            .unwrap();
        storage
            .create_user_impl(user_request("other@example.com", &[]))
            .await
            .unwrap();

        let page = storage
            .list_users_with_pagination_impl(UserListQuery {
                role: Some("teacher".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].email, "teach@example.com");

        let page = storage
            .list_users_with_pagination_impl(UserListQuery {
                search: Some("other@".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.items.len(), 1);
    }
}
