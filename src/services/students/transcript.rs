use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{StudentService, authorize_student_access, student_not_found};
use crate::models::{
    ApiResponse,
    students::{requests::TranscriptQuery, transcript::build_transcript},
};
use crate::utils::error_response;

pub async fn get_transcript(
    service: &StudentService,
    student_id: i64,
    query: TranscriptQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(resp) = authorize_student_access(&storage, request, student_id).await {
        return Ok(resp);
    }

    let student = match storage.get_student_by_id(student_id).await {
        Ok(Some(student)) => student,
        Ok(None) => return Ok(student_not_found()),
        Err(e) => return Ok(error_response(&e)),
    };

    match storage.list_student_grade_records(student_id).await {
        Ok(records) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            build_transcript(&student, &records, &query),
            "Transcript generated successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
