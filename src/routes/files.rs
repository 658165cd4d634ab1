use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RateLimit};
use crate::services::FileService;
use crate::utils::SafePhotoName;

// 懒加载的全局 FileService 实例
static FILE_SERVICE: Lazy<FileService> = Lazy::new(FileService::new_lazy);

pub async fn upload_photo(
    request: HttpRequest,
    payload: actix_multipart::Multipart,
) -> ActixResult<HttpResponse> {
    FILE_SERVICE.upload_photo(&request, payload).await
}

pub async fn serve_photo(request: HttpRequest, name: SafePhotoName) -> ActixResult<HttpResponse> {
    FILE_SERVICE.serve_photo(&request, name.0).await
}

// 配置路由
pub fn configure_file_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/files")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/photos")
                    .wrap(RateLimit::photo_upload())
                    .route(web::post().to(upload_photo)),
            )
            .route("/photos/{name}", web::get().to(serve_photo)),
    );
}
