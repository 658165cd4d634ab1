pub mod download;
pub mod upload;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

/// 照片上传与访问，文件直接存放在 `upload.dir`，不建数据库记录
pub struct FileService;

impl FileService {
    pub fn new_lazy() -> Self {
        Self
    }

    // 上传照片
    pub async fn upload_photo(
        &self,
        request: &HttpRequest,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        upload::upload_photo(self, request, payload).await
    }

    // 读取照片
    pub async fn serve_photo(
        &self,
        request: &HttpRequest,
        file_name: String,
    ) -> ActixResult<HttpResponse> {
        download::serve_photo(self, request, file_name).await
    }
}

/// 照片访问地址
pub fn photo_url(file_name: &str) -> String {
    format!("/api/v1/files/photos/{file_name}")
}
