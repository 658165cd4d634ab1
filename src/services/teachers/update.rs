use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{TeacherService, teacher_not_found};
use crate::models::{ApiResponse, ErrorCode, teachers::requests::UpdateTeacherRequest};
use crate::utils::error_response;
use crate::utils::validate::{validate_email, validate_required};

fn validate_teacher_update(update: &UpdateTeacherRequest) -> Result<(), String> {
    for (field, value) in [
        ("employee_id", &update.employee_id),
        ("first_name", &update.first_name),
        ("last_name", &update.last_name),
        ("phone", &update.phone),
        ("position", &update.position),
    ] {
        if let Some(value) = value {
            validate_required(field, value)?;
        }
    }
    if let Some(email) = &update.email {
        validate_email(email)?;
    }
    if update.experience_years.is_some_and(|years| years < 0) {
        return Err("experience_years must not be negative".to_string());
    }
    Ok(())
}

pub async fn update_teacher(
    service: &TeacherService,
    teacher_id: i64,
    mut update: UpdateTeacherRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    update.email = update.email.map(|email| email.trim().to_lowercase());

    if let Err(msg) = validate_teacher_update(&update) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    let storage = service.get_storage(request);

    match storage.update_teacher(teacher_id, update).await {
        Ok(Some(teacher)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            teacher,
            "Teacher updated successfully",
        ))),
        Ok(None) => Ok(teacher_not_found()),
        Err(e) => Ok(error_response(&e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_teacher_update() {
        assert!(validate_teacher_update(&UpdateTeacherRequest::default()).is_ok());
        assert!(
            validate_teacher_update(&UpdateTeacherRequest {
                experience_years: Some(-3),
                ..Default::default()
            })
            .is_err()
        );
        assert!(
            validate_teacher_update(&UpdateTeacherRequest {
                email: Some("bad".into()),
                ..Default::default()
            })
            .is_err()
        );
    }
}
