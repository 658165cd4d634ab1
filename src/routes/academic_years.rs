use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::academic_years::requests::{
    AcademicYearListQuery, CreateAcademicYearRequest, UpdateAcademicYearRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::AcademicYearService;
use crate::utils::SafeIDI64;

static ACADEMIC_YEAR_SERVICE: Lazy<AcademicYearService> =
    Lazy::new(AcademicYearService::new_lazy);

pub async fn list_academic_years(
    req: HttpRequest,
    query: web::Query<AcademicYearListQuery>,
) -> ActixResult<HttpResponse> {
    ACADEMIC_YEAR_SERVICE
        .list_academic_years(query.into_inner(), &req)
        .await
}

pub async fn create_academic_year(
    req: HttpRequest,
    year: web::Json<CreateAcademicYearRequest>,
) -> ActixResult<HttpResponse> {
    ACADEMIC_YEAR_SERVICE
        .create_academic_year(year.into_inner(), &req)
        .await
}

pub async fn get_current_academic_year(req: HttpRequest) -> ActixResult<HttpResponse> {
    ACADEMIC_YEAR_SERVICE.get_current_academic_year(&req).await
}

pub async fn get_academic_year(req: HttpRequest, year_id: SafeIDI64) -> ActixResult<HttpResponse> {
    ACADEMIC_YEAR_SERVICE.get_academic_year(year_id.0, &req).await
}

pub async fn update_academic_year(
    req: HttpRequest,
    year_id: SafeIDI64,
    update: web::Json<UpdateAcademicYearRequest>,
) -> ActixResult<HttpResponse> {
    ACADEMIC_YEAR_SERVICE
        .update_academic_year(year_id.0, update.into_inner(), &req)
        .await
}

pub async fn set_current_academic_year(
    req: HttpRequest,
    year_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    ACADEMIC_YEAR_SERVICE
        .set_current_academic_year(year_id.0, &req)
        .await
}

pub async fn delete_academic_year(
    req: HttpRequest,
    year_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    ACADEMIC_YEAR_SERVICE
        .delete_academic_year(year_id.0, &req)
        .await
}

pub fn configure_academic_year_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/academic-years")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_academic_years))
                    .route(
                        web::post()
                            .to(create_academic_year)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            )
            // 需在 /{id} 之前注册
            .service(web::resource("/current").route(web::get().to(get_current_academic_year)))
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_academic_year))
                    .route(
                        web::put()
                            .to(update_academic_year)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_academic_year)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            )
            .service(
                web::resource("/{id}/current")
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .route(web::post().to(set_current_academic_year)),
            ),
    );
}
