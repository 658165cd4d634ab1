use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{StudentService, student_not_found};
use crate::models::{ApiResponse, ErrorCode, students::requests::UpdateStudentRequest};
use crate::utils::error_response;
use crate::utils::validate::{validate_email, validate_required};

fn validate_student_update(update: &UpdateStudentRequest) -> Result<(), String> {
    for (field, value) in [
        ("matricule", &update.matricule),
        ("first_name", &update.first_name),
        ("last_name", &update.last_name),
        ("current_class", &update.current_class),
        ("guardian_name", &update.guardian_name),
        ("guardian_phone", &update.guardian_phone),
    ] {
        if let Some(value) = value {
            validate_required(field, value)?;
        }
    }
    for email in [&update.email, &update.guardian_email].into_iter().flatten() {
        validate_email(email)?;
    }
    Ok(())
}

pub async fn update_student(
    service: &StudentService,
    student_id: i64,
    mut update: UpdateStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    update.email = update.email.map(|email| email.trim().to_lowercase());

    if let Err(msg) = validate_student_update(&update) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    let storage = service.get_storage(request);

    match storage.update_student(student_id, update).await {
        Ok(Some(student)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            student,
            "Student updated successfully",
        ))),
        Ok(None) => Ok(student_not_found()),
        Err(e) => Ok(error_response(&e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_student_update() {
        assert!(validate_student_update(&UpdateStudentRequest::default()).is_ok());
        assert!(
            validate_student_update(&UpdateStudentRequest {
                guardian_email: Some("invalid".into()),
                ..Default::default()
            })
            .is_err()
        );
        assert!(
            validate_student_update(&UpdateStudentRequest {
                last_name: Some(" ".into()),
                ..Default::default()
            })
            .is_err()
        );
    }
}
