use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeacherService;
use crate::models::{ApiResponse, ErrorCode, teachers::requests::CreateTeacherRequest};
use crate::utils::error_response;
use crate::utils::validate::{validate_email, validate_required};

/// 校验必填字段、邮箱格式与工龄
pub(super) fn validate_new_teacher(teacher: &CreateTeacherRequest) -> Result<(), String> {
    for (field, value) in [
        ("first_name", &teacher.first_name),
        ("last_name", &teacher.last_name),
        ("phone", &teacher.phone),
        ("position", &teacher.position),
        ("contract_type", &teacher.contract_type),
    ] {
        validate_required(field, value)?;
    }
    validate_email(&teacher.email)?;
    if let Some(employee_id) = &teacher.employee_id {
        validate_required("employee_id", employee_id)?;
    }
    if teacher.experience_years < 0 {
        return Err("experience_years must not be negative".to_string());
    }
    Ok(())
}

pub async fn create_teacher(
    service: &TeacherService,
    mut teacher: CreateTeacherRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    teacher.email = teacher.email.trim().to_lowercase();

    if let Err(msg) = validate_new_teacher(&teacher) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    let storage = service.get_storage(request);

    match storage.create_teacher(teacher).await {
        Ok(teacher) => Ok(HttpResponse::Created().json(ApiResponse::success(
            teacher,
            "Teacher created successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateTeacherRequest {
        CreateTeacherRequest {
            employee_id: None,
            first_name: "Ibrahima".into(),
            last_name: "Sow".into(),
            email: "i.sow@example.com".into(),
            phone: "+221 77 000 00 00".into(),
            address: "Avenue 3".into(),
            gender: "male".into(),
            birth_date: chrono::NaiveDate::from_ymd_opt(1980, 3, 12).unwrap(),
            nationality: "SN".into(),
            photo: None,
            joining_date: chrono::NaiveDate::from_ymd_opt(2015, 9, 1).unwrap(),
            contract_type: "permanent".into(),
            employment_status: None,
            qualification: "Master".into(),
            specialization: "Physique".into(),
            experience_years: 9,
            previous_employment: None,
            department_id: 1,
            position: "Professeur".into(),
            salary_grade: "A2".into(),
            bank_account: None,
            tax_number: None,
            social_security_number: None,
            emergency_contact_name: "Mariama Sow".into(),
            emergency_contact_phone: "+221 76 000 00 00".into(),
            additional_info: None,
        }
    }

    #[test]
    fn test_validate_new_teacher() {
        assert!(validate_new_teacher(&request()).is_ok());

        let mut teacher = request();
        teacher.experience_years = -1;
        assert!(validate_new_teacher(&teacher).is_err());

        let mut teacher = request();
        teacher.email = "not-an-email".into();
        assert!(validate_new_teacher(&teacher).is_err());

        let mut teacher = request();
        teacher.first_name = "  ".into();
        assert!(validate_new_teacher(&teacher).is_err());
    }
}
