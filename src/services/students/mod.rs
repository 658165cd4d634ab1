pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod records;
pub mod transcript;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::info;

use crate::middlewares::RequireJWT;
use crate::models::students::requests::{
    CreateStudentRequest, StudentListQuery, TranscriptQuery, UpdateStudentRequest,
};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode, PaginationQuery};
use crate::storage::Storage;
use crate::utils::error_response;

pub struct StudentService {
    storage: Option<Arc<dyn Storage>>,
}

impl StudentService {
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

    pub async fn list_students(
        &self,
        query: StudentListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_students(self, query, request).await
    }

    pub async fn create_student(
        &self,
        student: CreateStudentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_student(self, student, request).await
    }

    pub async fn get_student(
        &self,
        student_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_student(self, student_id, request).await
    }

    pub async fn update_student(
        &self,
        student_id: i64,
        update: UpdateStudentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_student(self, student_id, update, request).await
    }

    pub async fn delete_student(
        &self,
        student_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_student(self, student_id, request).await
    }

    pub async fn list_enrollments(
        &self,
        student_id: i64,
        query: PaginationQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        records::list_enrollments(self, student_id, query, request).await
    }

    pub async fn list_grades(
        &self,
        student_id: i64,
        query: PaginationQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        records::list_grades(self, student_id, query, request).await
    }

    pub async fn list_payments(
        &self,
        student_id: i64,
        query: PaginationQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        records::list_payments(self, student_id, query, request).await
    }

    // 成绩单
    pub async fn get_transcript(
        &self,
        student_id: i64,
        query: TranscriptQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        transcript::get_transcript(self, student_id, query, request).await
    }
}

fn student_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::StudentNotFound,
        "Student not found",
    ))
}

/// 教职工可读任意学生；学生用户只能读取邮箱与自己账号一致的档案
async fn authorize_student_access(
    storage: &Arc<dyn Storage>,
    request: &HttpRequest,
    student_id: i64,
) -> Result<(), HttpResponse> {
    let Some(user) = RequireJWT::extract_user_claims(request) else {
        return Err(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Authentication required",
        )));
    };

    if user.has_any_role(UserRole::staff_roles()) {
        return Ok(());
    }

    match storage.get_student_by_email(&user.email).await {
        Ok(Some(student)) if student.id == student_id => Ok(()),
        Ok(_) => {
            info!(
                "User {} denied access to student record {}",
                user.id, student_id
            );
            Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::Forbidden,
                "You can only access your own student record",
            )))
        }
        Err(e) => Err(error_response(&e)),
    }
}
