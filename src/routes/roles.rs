use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::SyncIdsRequest;
use crate::models::roles::requests::{CreateRoleRequest, RoleListQuery, UpdateRoleRequest};
use crate::models::users::entities::UserRole;
use crate::services::RoleService;
use crate::utils::SafeIDI64;

static ROLE_SERVICE: Lazy<RoleService> = Lazy::new(RoleService::new_lazy);

pub async fn list_roles(
    req: HttpRequest,
    query: web::Query<RoleListQuery>,
) -> ActixResult<HttpResponse> {
    ROLE_SERVICE.list_roles(query.into_inner(), &req).await
}

pub async fn create_role(
    req: HttpRequest,
    role: web::Json<CreateRoleRequest>,
) -> ActixResult<HttpResponse> {
    ROLE_SERVICE.create_role(role.into_inner(), &req).await
}

pub async fn get_role(req: HttpRequest, role_id: SafeIDI64) -> ActixResult<HttpResponse> {
    ROLE_SERVICE.get_role(role_id.0, &req).await
}

pub async fn update_role(
    req: HttpRequest,
    role_id: SafeIDI64,
    update: web::Json<UpdateRoleRequest>,
) -> ActixResult<HttpResponse> {
    ROLE_SERVICE
        .update_role(role_id.0, update.into_inner(), &req)
        .await
}

pub async fn sync_role_permissions(
    req: HttpRequest,
    role_id: SafeIDI64,
    ids: web::Json<SyncIdsRequest>,
) -> ActixResult<HttpResponse> {
    ROLE_SERVICE
        .sync_permissions(role_id.0, ids.into_inner(), &req)
        .await
}

pub async fn delete_role(req: HttpRequest, role_id: SafeIDI64) -> ActixResult<HttpResponse> {
    ROLE_SERVICE.delete_role(role_id.0, &req).await
}

pub fn configure_role_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/roles")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .route("", web::get().to(list_roles))
                    .route("", web::post().to(create_role))
                    .route("/{id}", web::get().to(get_role))
                    .route("/{id}", web::put().to(update_role))
                    .route("/{id}", web::delete().to(delete_role))
                    .route("/{id}/permissions", web::put().to(sync_role_permissions)),
            ),
    );
}
