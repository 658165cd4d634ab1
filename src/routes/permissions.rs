use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::roles::requests::{
    CreatePermissionRequest, RoleListQuery, UpdatePermissionRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::PermissionService;
use crate::utils::SafeIDI64;

static PERMISSION_SERVICE: Lazy<PermissionService> = Lazy::new(PermissionService::new_lazy);

pub async fn list_permissions(
    req: HttpRequest,
    query: web::Query<RoleListQuery>,
) -> ActixResult<HttpResponse> {
    PERMISSION_SERVICE
        .list_permissions(query.into_inner(), &req)
        .await
}

pub async fn create_permission(
    req: HttpRequest,
    permission: web::Json<CreatePermissionRequest>,
) -> ActixResult<HttpResponse> {
    PERMISSION_SERVICE
        .create_permission(permission.into_inner(), &req)
        .await
}

pub async fn update_permission(
    req: HttpRequest,
    permission_id: SafeIDI64,
    update: web::Json<UpdatePermissionRequest>,
) -> ActixResult<HttpResponse> {
    PERMISSION_SERVICE
        .update_permission(permission_id.0, update.into_inner(), &req)
        .await
}

pub async fn delete_permission(
    req: HttpRequest,
    permission_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    PERMISSION_SERVICE
        .delete_permission(permission_id.0, &req)
        .await
}

pub fn configure_permission_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/permissions")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .route("", web::get().to(list_permissions))
                    .route("", web::post().to(create_permission))
                    .route("/{id}", web::put().to(update_permission))
                    .route("/{id}", web::delete().to(delete_permission)),
            ),
    );
}
