//! 路径参数提取器
//!
//! 在进入处理函数之前校验路径参数，非法值直接返回统一的 400 响应。

use actix_web::{
    FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError,
    http::header::CONTENT_TYPE,
};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

fn bad_request(message: String) -> actix_web::Error {
    let response = HttpResponse::BadRequest()
        .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
        .json(ApiResponse::<()>::error_empty(ErrorCode::BadRequest, &message));
    InternalError::from_response(message, response).into()
}

/// 定义正整数 ID 路径参数提取器
macro_rules! define_safe_i64_extractor {
    ($name:ident, $param:literal) => {
        #[derive(Debug, Clone, Copy)]
        pub struct $name(pub i64);

        impl FromRequest for $name {
            type Error = actix_web::Error;
            type Future = Ready<Result<Self, Self::Error>>;

            fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
                let parsed = req
                    .match_info()
                    .get($param)
                    .and_then(|raw| raw.parse::<i64>().ok())
                    .filter(|id| *id > 0);
                ready(match parsed {
                    Some(id) => Ok($name(id)),
                    None => Err(bad_request(format!("Invalid path parameter '{}'", $param))),
                })
            }
        }
    };
}

define_safe_i64_extractor!(SafeIDI64, "id");

/// 照片文件名：uuid + 图片扩展名，禁止路径分隔符
#[derive(Debug, Clone)]
pub struct SafePhotoName(pub String);

impl SafePhotoName {
    pub fn is_valid(name: &str) -> bool {
        let Some((stem, ext)) = name.rsplit_once('.') else {
            return false;
        };
        uuid::Uuid::parse_str(stem).is_ok()
            && matches!(
                ext.to_ascii_lowercase().as_str(),
                "png" | "jpg" | "jpeg" | "gif" | "webp"
            )
    }
}

impl FromRequest for SafePhotoName {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let name = req.match_info().get("name").unwrap_or_default();
        ready(if Self::is_valid(name) {
            Ok(SafePhotoName(name.to_string()))
        } else {
            Err(bad_request("Invalid photo name".to_string()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_safe_id_extractor() {
        let req = TestRequest::default().param("id", "42").to_http_request();
        let id = SafeIDI64::extract(&req).await.unwrap();
        assert_eq!(id.0, 42);

        for bad in ["0", "-3", "abc", "1.5"] {
            let req = TestRequest::default().param("id", bad).to_http_request();
            assert!(SafeIDI64::extract(&req).await.is_err());
        }
    }

    #[test]
    fn test_photo_name() {
        assert!(SafePhotoName::is_valid(
            "0f8fad5b-d9cb-469f-a165-70867728950e.png"
        ));
        assert!(!SafePhotoName::is_valid("../../etc/passwd"));
        assert!(!SafePhotoName::is_valid(
            "0f8fad5b-d9cb-469f-a165-70867728950e.exe"
        ));
        assert!(!SafePhotoName::is_valid("noextension"));
    }
}
