use sea_orm_migration::prelude::*;

use crate::{id_column, timestamp_columns};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建用户表
        let mut users = Table::create();
        users
            .table(Users::Table)
            .if_not_exists()
            .col(id_column(Users::Id))
            .col(ColumnDef::new(Users::FirstName).string().not_null())
            .col(ColumnDef::new(Users::LastName).string().not_null())
            .col(ColumnDef::new(Users::Email).string().not_null().unique_key())
            .col(ColumnDef::new(Users::PasswordHash).string().not_null())
            .col(ColumnDef::new(Users::Phone).string().not_null())
            .col(ColumnDef::new(Users::Address).text().not_null())
            .col(ColumnDef::new(Users::City).string().not_null())
            .col(ColumnDef::new(Users::Country).string().not_null())
            .col(ColumnDef::new(Users::Gender).string().not_null())
            .col(ColumnDef::new(Users::BirthDate).string().not_null())
            .col(ColumnDef::new(Users::Photo).string().null())
            .col(
                ColumnDef::new(Users::Status)
                    .string()
                    .not_null()
                    .default("active"),
            )
            .col(ColumnDef::new(Users::LastLoginAt).big_integer().null())
            .col(ColumnDef::new(Users::EmailVerifiedAt).big_integer().null());
        for col in timestamp_columns() {
            users.col(col);
        }
        manager.create_table(users).await?;

        // 创建角色表
        let mut roles = Table::create();
        roles
            .table(Roles::Table)
            .if_not_exists()
            .col(id_column(Roles::Id))
            .col(ColumnDef::new(Roles::Name).string().not_null().unique_key())
            .col(ColumnDef::new(Roles::Description).string().null());
        for col in timestamp_columns() {
            roles.col(col);
        }
        manager.create_table(roles).await?;

        // 创建权限表
        let mut permissions = Table::create();
        permissions
            .table(Permissions::Table)
            .if_not_exists()
            .col(id_column(Permissions::Id))
            .col(ColumnDef::new(Permissions::Name).string().not_null())
            .col(
                ColumnDef::new(Permissions::Slug)
                    .string()
                    .not_null()
                    .unique_key(),
            )
            .col(ColumnDef::new(Permissions::Description).text().null());
        for col in timestamp_columns() {
            permissions.col(col);
        }
        manager.create_table(permissions).await?;

        // 用户-角色关联表
        manager
            .create_table(
                Table::create()
                    .table(UserRoles::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(UserRoles::UserId).big_integer().not_null())
                    .col(ColumnDef::new(UserRoles::RoleId).big_integer().not_null())
                    .col(
                        ColumnDef::new(UserRoles::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(UserRoles::UserId)
                            .col(UserRoles::RoleId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(UserRoles::Table, UserRoles::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(UserRoles::Table, UserRoles::RoleId)
                            .to(Roles::Table, Roles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 角色-权限关联表
        manager
            .create_table(
                Table::create()
                    .table(RolePermissions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RolePermissions::RoleId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RolePermissions::PermissionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RolePermissions::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(RolePermissions::RoleId)
                            .col(RolePermissions::PermissionId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(RolePermissions::Table, RolePermissions::RoleId)
                            .to(Roles::Table, Roles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(RolePermissions::Table, RolePermissions::PermissionId)
                            .to(Permissions::Table, Permissions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_user_roles_role_id")
                    .table(UserRoles::Table)
                    .col(UserRoles::RoleId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(RolePermissions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserRoles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Permissions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Roles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
pub(crate) enum Users {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    PasswordHash,
    Phone,
    Address,
    City,
    Country,
    Gender,
    BirthDate,
    Photo,
    Status,
    LastLoginAt,
    EmailVerifiedAt,
}

#[derive(DeriveIden)]
enum Roles {
    #[sea_orm(iden = "roles")]
    Table,
    Id,
    Name,
    Description,
}

#[derive(DeriveIden)]
enum Permissions {
    #[sea_orm(iden = "permissions")]
    Table,
    Id,
    Name,
    Slug,
    Description,
}

#[derive(DeriveIden)]
enum UserRoles {
    #[sea_orm(iden = "user_roles")]
    Table,
    UserId,
    RoleId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum RolePermissions {
    #[sea_orm(iden = "role_permissions")]
    Table,
    RoleId,
    PermissionId,
    CreatedAt,
}
