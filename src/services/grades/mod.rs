pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::info;

use crate::middlewares::RequireJWT;
use crate::models::grades::requests::{CreateGradeRequest, GradeListQuery, UpdateGradeRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;
use crate::utils::error_response;

pub struct GradeService {
    storage: Option<Arc<dyn Storage>>,
}

impl GradeService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub async fn list_grades(
        &self,
        query: GradeListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_grades(self, query, request).await
    }

    pub async fn create_grade(
        &self,
        grade: CreateGradeRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_grade(self, grade, request).await
    }

    pub async fn get_grade(
        &self,
        grade_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_grade(self, grade_id, request).await
    }

    pub async fn update_grade(
        &self,
        grade_id: i64,
        update: UpdateGradeRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_grade(self, grade_id, update, request).await
    }

    pub async fn delete_grade(
        &self,
        grade_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_grade(self, grade_id, request).await
    }
}

fn grade_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::GradeNotFound,
        "Grade not found",
    ))
}

/// 成绩必须在 0 到满分之间，最多两位小数
pub(crate) fn validate_grade_value(value: f64, max_value: f64) -> Result<(), String> {
    if !value.is_finite() || value < 0.0 || value > max_value {
        return Err(format!("grade_value must be between 0 and {max_value}"));
    }
    let scaled = value * 100.0;
    if (scaled - scaled.round()).abs() > 1e-6 {
        return Err("grade_value must have at most two decimals".to_string());
    }
    Ok(())
}

/// 录入人身份
pub(crate) enum Recorder {
    Admin,
    Teacher(i64),
}

/// 管理员可操作任意课程；教师按邮箱关联到教师档案，且只能操作自己任教的课程
async fn resolve_recorder(
    storage: &Arc<dyn Storage>,
    request: &HttpRequest,
    course_id: i64,
) -> Result<Recorder, HttpResponse> {
    let Some(user) = RequireJWT::extract_user_claims(request) else {
        return Err(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Authentication required",
        )));
    };

    if user.is_admin() {
        return Ok(Recorder::Admin);
    }

    let teacher = match storage.get_teacher_by_email(&user.email).await {
        Ok(Some(teacher)) => teacher,
        Ok(None) => {
            return Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::Forbidden,
                "No teacher profile is linked to this account",
            )));
        }
        Err(e) => return Err(error_response(&e)),
    };

    match storage.is_course_teacher(teacher.id, course_id).await {
        Ok(true) => Ok(Recorder::Teacher(teacher.id)),
        Ok(false) => {
            info!(
                "Teacher {} is not assigned to course {}",
                teacher.id, course_id
            );
            Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::NotCourseTeacher,
                "You do not teach this course",
            )))
        }
        Err(e) => Err(error_response(&e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_grade_value() {
        assert!(validate_grade_value(0.0, 20.0).is_ok());
        assert!(validate_grade_value(20.0, 20.0).is_ok());
        assert!(validate_grade_value(14.25, 20.0).is_ok());
        assert!(validate_grade_value(20.01, 20.0).is_err());
        assert!(validate_grade_value(-0.5, 20.0).is_err());
        assert!(validate_grade_value(12.345, 20.0).is_err());
        assert!(validate_grade_value(f64::NAN, 20.0).is_err());
        assert!(validate_grade_value(85.5, 100.0).is_ok());
    }
}
