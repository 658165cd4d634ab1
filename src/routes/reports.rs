use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::reports::requests::{CreateReportRequest, ReportListQuery};
use crate::models::users::entities::UserRole;
use crate::services::ReportService;
use crate::utils::SafeIDI64;

static REPORT_SERVICE: Lazy<ReportService> = Lazy::new(ReportService::new_lazy);

pub async fn list_reports(
    req: HttpRequest,
    query: web::Query<ReportListQuery>,
) -> ActixResult<HttpResponse> {
    REPORT_SERVICE.list_reports(query.into_inner(), &req).await
}

pub async fn get_report_options(req: HttpRequest) -> ActixResult<HttpResponse> {
    REPORT_SERVICE.get_options(&req).await
}

// 生成任务异步执行，立即返回 202
pub async fn create_report(
    req: HttpRequest,
    report: web::Json<CreateReportRequest>,
) -> ActixResult<HttpResponse> {
    REPORT_SERVICE.create_report(report.into_inner(), &req).await
}

pub async fn get_report(req: HttpRequest, report_id: SafeIDI64) -> ActixResult<HttpResponse> {
    REPORT_SERVICE.get_report(report_id.0, &req).await
}

pub async fn download_report(req: HttpRequest, report_id: SafeIDI64) -> ActixResult<HttpResponse> {
    REPORT_SERVICE.download_report(report_id.0, &req).await
}

pub async fn delete_report(req: HttpRequest, report_id: SafeIDI64) -> ActixResult<HttpResponse> {
    REPORT_SERVICE.delete_report(report_id.0, &req).await
}

pub fn configure_report_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/reports")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles()))
                    .service(
                        web::resource("").route(web::get().to(list_reports)).route(
                            web::post()
                                .to(create_report)
                                .wrap(middlewares::RequireRole::new_any(UserRole::finance_roles())),
                        ),
                    )
                    // 需在 /{id} 之前注册
                    .service(
                        web::resource("/options")
                            .wrap(middlewares::RequireRole::new_any(UserRole::finance_roles()))
                            .route(web::get().to(get_report_options)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(get_report))
                            .route(
                                web::delete().to(delete_report).wrap(
                                    middlewares::RequireRole::new_any(UserRole::finance_roles()),
                                ),
                            ),
                    )
                    .service(
                        web::resource("/{id}/download").route(web::get().to(download_report)),
                    ),
            ),
    );
}
