use actix_web::{HttpResponse, http::StatusCode};
use tracing::error;

use crate::errors::SchoolError;
use crate::models::{ApiResponse, ErrorCode};

/// 错误对应的 HTTP 状态码与业务错误码
pub fn error_status(err: &SchoolError) -> (StatusCode, ErrorCode) {
    match err {
        SchoolError::Validation(_) => (StatusCode::BAD_REQUEST, ErrorCode::ValidationFailed),
        SchoolError::Authentication(_) => (StatusCode::UNAUTHORIZED, ErrorCode::Unauthorized),
        SchoolError::Authorization(_) => (StatusCode::FORBIDDEN, ErrorCode::Forbidden),
        SchoolError::NotFound(_) => (StatusCode::NOT_FOUND, ErrorCode::NotFound),
        SchoolError::Conflict(_) => (StatusCode::CONFLICT, ErrorCode::Conflict),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::InternalServerError,
        ),
    }
}

/// 将 SchoolError 转换为统一响应
pub fn error_response(err: &SchoolError) -> HttpResponse {
    let (status, code) = error_status(err);
    error_response_with_code(err, status, code)
}

/// 保留状态码映射，替换业务错误码
pub fn error_response_as(err: &SchoolError, code: ErrorCode) -> HttpResponse {
    let (status, _) = error_status(err);
    error_response_with_code(err, status, code)
}

fn error_response_with_code(err: &SchoolError, status: StatusCode, code: ErrorCode) -> HttpResponse {
    if status.is_server_error() {
        error!("{}", err.format_simple());
    }
    HttpResponse::build(status).json(ApiResponse::error_empty(code, err.message()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (SchoolError::validation("x"), StatusCode::BAD_REQUEST),
            (SchoolError::authentication("x"), StatusCode::UNAUTHORIZED),
            (SchoolError::authorization("x"), StatusCode::FORBIDDEN),
            (SchoolError::not_found("x"), StatusCode::NOT_FOUND),
            (SchoolError::conflict("x"), StatusCode::CONFLICT),
            (
                SchoolError::database_operation("x"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                SchoolError::report_generation("x"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(error_status(&err).0, status);
            assert_eq!(error_response(&err).status(), status);
        }
    }

    #[test]
    fn test_code_override_keeps_status() {
        let resp = error_response_as(&SchoolError::conflict("full"), ErrorCode::CourseFull);
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }
}
