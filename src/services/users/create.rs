use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::errors::SchoolError;
use crate::models::{ApiResponse, ErrorCode, users::requests::CreateUserRequest};
use crate::utils::http::error_response_as;
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password_simple, validate_required};
use crate::utils::error_response;

/// 创建用户前的字段校验
pub(super) fn validate_new_user(user: &CreateUserRequest) -> Result<(), String> {
    validate_required("first_name", &user.first_name)?;
    validate_required("last_name", &user.last_name)?;
    validate_required("gender", &user.gender)?;
    validate_email(&user.email)?;
    validate_password_simple(&user.password)
}

pub async fn create_user(
    service: &UserService,
    mut user_data: CreateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    user_data.email = user_data.email.trim().to_lowercase();

    if let Err(msg) = validate_new_user(&user_data) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    user_data.password = match hash_password(&user_data.password) {
        Ok(hash) => hash,
        Err(e) => return Ok(error_response(&e)),
    };

    let storage = service.get_storage(request);

    match storage.create_user(user_data).await {
        Ok(user) => {
            tracing::info!("User {} created", user.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(user, "User created successfully")))
        }
        Err(e @ SchoolError::Conflict(_)) => {
            Ok(error_response_as(&e, ErrorCode::UserAlreadyExists))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateUserRequest {
        CreateUserRequest {
            first_name: "Awa".into(),
            last_name: "Diallo".into(),
            email: "awa@example.com".into(),
            password: "Secure123".into(),
            phone: String::new(),
            address: String::new(),
            city: String::new(),
            country: String::new(),
            gender: "female".into(),
            birth_date: chrono::NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            photo: None,
            status: None,
            roles: vec!["teacher".into()],
        }
    }

    #[test]
    fn test_validate_new_user() {
        assert!(validate_new_user(&request()).is_ok());

        let mut bad_email = request();
        bad_email.email = "awa".into();
        assert!(validate_new_user(&bad_email).is_err());

        let mut weak = request();
        weak.password = "short".into();
        assert!(validate_new_user(&weak).is_err());

        let mut blank = request();
        blank.first_name = "  ".into();
        assert_eq!(
            validate_new_user(&blank).unwrap_err(),
            "The first_name field is required"
        );
    }
}
