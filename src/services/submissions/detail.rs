use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::models::{ApiResponse, ErrorCode, submissions::responses::SubmissionResponse};

pub async fn get_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_submission_by_id(submission_id).await {
        Ok(submission) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            SubmissionResponse::from(submission),
            "Submission retrieved successfully",
        ))),
        Err(e) => Ok(ApiResponse::from_portal_error(
            &e,
            ErrorCode::SubmissionNotFound,
        )),
    }
}
