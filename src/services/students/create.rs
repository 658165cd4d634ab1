use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::models::{ApiResponse, ErrorCode, students::requests::CreateStudentRequest};
use crate::utils::error_response;
use crate::utils::validate::{validate_email, validate_required};

pub(super) fn validate_new_student(student: &CreateStudentRequest) -> Result<(), String> {
    for (field, value) in [
        ("first_name", &student.first_name),
        ("last_name", &student.last_name),
        ("current_class", &student.current_class),
        ("education_level", &student.education_level),
        ("guardian_name", &student.guardian_name),
        ("guardian_phone", &student.guardian_phone),
        ("emergency_contact", &student.emergency_contact),
    ] {
        validate_required(field, value)?;
    }
    if let Some(matricule) = &student.matricule {
        validate_required("matricule", matricule)?;
    }
    if let Some(email) = &student.email {
        validate_email(email)?;
    }
    if let Some(email) = &student.guardian_email {
        validate_email(email)?;
    }
    if student.admission_date < student.birth_date {
        return Err("admission_date must be after birth_date".to_string());
    }
    Ok(())
}

pub async fn create_student(
    service: &StudentService,
    mut student: CreateStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    student.email = student
        .email
        .map(|email| email.trim().to_lowercase())
        .filter(|email| !email.is_empty());

    if let Err(msg) = validate_new_student(&student) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    let storage = service.get_storage(request);

    match storage.create_student(student).await {
        Ok(student) => Ok(HttpResponse::Created().json(ApiResponse::success(
            student,
            "Student created successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn request() -> CreateStudentRequest {
        CreateStudentRequest {
            matricule: None,
            first_name: "Moussa".into(),
            last_name: "Traore".into(),
            email: Some("moussa@example.com".into()),
            phone: None,
            address: "Quartier 5".into(),
            gender: "male".into(),
            birth_date: NaiveDate::from_ymd_opt(2010, 5, 4).unwrap(),
            birth_place: "Thiès".into(),
            nationality: "SN".into(),
            photo: None,
            admission_date: NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
            current_class: "6A".into(),
            academic_year_id: 1,
            education_level: "secondary".into(),
            previous_school: None,
            guardian_name: "Fatou Traore".into(),
            guardian_relationship: "mother".into(),
            guardian_phone: "+221 78 000 00 00".into(),
            guardian_email: None,
            guardian_address: "Quartier 5".into(),
            guardian_occupation: "nurse".into(),
            health_issues: None,
            blood_group: None,
            emergency_contact: "+221 78 000 00 00".into(),
            status: None,
            additional_info: None,
        }
    }

    #[test]
    fn test_validate_new_student() {
        assert!(validate_new_student(&request()).is_ok());

        let mut student = request();
        student.guardian_email = Some("nope".into());
        assert!(validate_new_student(&student).is_err());

        let mut student = request();
        student.admission_date = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        assert!(validate_new_student(&student).is_err());

        let mut student = request();
        student.current_class = String::new();
        assert!(validate_new_student(&student).is_err());
    }
}
