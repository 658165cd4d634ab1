use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::auth::requests::UpdateProfileRequest;
use crate::models::auth::responses::UserInfoResponse;
use crate::models::users::requests::UpdateUserRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::error_response;
use crate::utils::password::{hash_password, verify_password};
use crate::utils::validate::validate_password_simple;

use super::AuthService;

pub async fn handle_update_profile(
    service: &AuthService,
    update_data: UpdateProfileRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        )));
    };

    // 缓存中的用户不含密码哈希，重新读取
    let current_user = match storage.get_user_by_id(user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::UserNotFound,
                "User not found",
            )));
        }
        Err(e) => return Ok(error_response(&e)),
    };

    let hashed_password = match update_data.new_password {
        Some(ref new_password) => {
            let current_ok = update_data
                .current_password
                .as_deref()
                .is_some_and(|current| verify_password(current, &current_user.password_hash));
            if !current_ok {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::InvalidCurrentPassword,
                    "Current password is incorrect",
                )));
            }

            if let Err(msg) = validate_password_simple(new_password) {
                return Ok(HttpResponse::BadRequest()
                    .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
            }

            match hash_password(new_password) {
                Ok(hash) => Some(hash),
                Err(e) => return Ok(error_response(&e)),
            }
        }
        None => None,
    };

    // 个人资料只允许修改联系方式、照片和密码
    let storage_update = UpdateUserRequest {
        password: hashed_password,
        phone: update_data.phone,
        address: update_data.address,
        city: update_data.city,
        country: update_data.country,
        photo: update_data.photo,
        ..Default::default()
    };

    match storage.update_user(user_id, storage_update).await {
        Ok(Some(user)) => {
            RequireJWT::evict_cached_user(request, user_id).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                UserInfoResponse { user },
                "Profile updated successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "User not found",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
