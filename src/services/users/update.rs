use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::errors::SchoolError;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, users::requests::UpdateUserRequest};
use crate::utils::error_response;
use crate::utils::http::error_response_as;
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password_simple, validate_required};

fn validate_user_update(update: &UpdateUserRequest) -> Result<(), String> {
    if let Some(ref first_name) = update.first_name {
        validate_required("first_name", first_name)?;
    }
    if let Some(ref last_name) = update.last_name {
        validate_required("last_name", last_name)?;
    }
    if let Some(ref email) = update.email {
        validate_email(email)?;
    }
    if let Some(ref password) = update.password {
        validate_password_simple(password)?;
    }
    Ok(())
}

pub async fn update_user(
    service: &UserService,
    user_id: i64,
    mut update_data: UpdateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Some(ref mut email) = update_data.email {
        *email = email.trim().to_lowercase();
    }

    if let Err(msg) = validate_user_update(&update_data) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    if let Some(password) = update_data.password.take() {
        match hash_password(&password) {
            Ok(hash) => update_data.password = Some(hash),
            Err(e) => return Ok(error_response(&e)),
        }
    }

    let storage = service.get_storage(request);

    match storage.update_user(user_id, update_data).await {
        Ok(Some(user)) => {
            RequireJWT::evict_cached_user(request, user_id).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(user, "User updated successfully")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "User not found",
        ))),
        Err(e @ SchoolError::Conflict(_)) => {
            Ok(error_response_as(&e, ErrorCode::UserAlreadyExists))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_update_validation() {
        assert!(validate_user_update(&UpdateUserRequest::default()).is_ok());
        assert!(
            validate_user_update(&UpdateUserRequest {
                email: Some("broken".into()),
                ..Default::default()
            })
            .is_err()
        );
        assert!(
            validate_user_update(&UpdateUserRequest {
                last_name: Some("".into()),
                ..Default::default()
            })
            .is_err()
        );
    }
}
