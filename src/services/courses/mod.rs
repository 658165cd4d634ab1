pub mod create;
pub mod delete;
pub mod enrollments;
pub mod get;
pub mod list;
pub mod teachers;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::courses::requests::{CourseListQuery, CreateCourseRequest, UpdateCourseRequest};
use crate::models::{ApiResponse, ErrorCode, PaginationQuery, SyncIdsRequest};
use crate::storage::Storage;

pub struct CourseService {
    storage: Option<Arc<dyn Storage>>,
}

impl CourseService {
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

    pub async fn list_courses(
        &self,
        query: CourseListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_courses(self, query, request).await
    }

    pub async fn create_course(
        &self,
        course: CreateCourseRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_course(self, course, request).await
    }

    pub async fn get_course(
        &self,
        course_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_course(self, course_id, request).await
    }

    pub async fn update_course(
        &self,
        course_id: i64,
        update: UpdateCourseRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_course(self, course_id, update, request).await
    }

    pub async fn sync_teachers(
        &self,
        course_id: i64,
        ids: SyncIdsRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        teachers::sync_teachers(self, course_id, ids, request).await
    }

    // 课程的选课名单
    pub async fn list_enrollments(
        &self,
        course_id: i64,
        query: PaginationQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        enrollments::list_enrollments(self, course_id, query, request).await
    }

    pub async fn delete_course(
        &self,
        course_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_course(self, course_id, request).await
    }
}

fn course_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::CourseNotFound,
        "Course not found",
    ))
}

/// 学分、周课时与容量必须为正数
fn validate_course_numbers(
    credits: Option<i32>,
    hours_per_week: Option<i32>,
    max_students: Option<i32>,
) -> Result<(), String> {
    for (field, value) in [
        ("credits", credits),
        ("hours_per_week", hours_per_week),
        ("max_students", max_students),
    ] {
        if value.is_some_and(|v| v <= 0) {
            return Err(format!("{field} must be greater than 0"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_course_numbers() {
        assert!(validate_course_numbers(Some(3), Some(4), Some(30)).is_ok());
        assert!(validate_course_numbers(None, None, None).is_ok());
        assert_eq!(
            validate_course_numbers(Some(3), Some(0), Some(30)).unwrap_err(),
            "hours_per_week must be greater than 0"
        );
        assert!(validate_course_numbers(Some(-1), None, None).is_err());
    }
}
