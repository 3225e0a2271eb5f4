use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use super::upload::read_file_field;
use crate::models::{ApiResponse, ErrorCode, submissions::responses::SubmissionResponse};

pub async fn update_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    let file = match read_file_field(payload).await? {
        Ok(file) => file,
        Err(response) => return Ok(response),
    };

    let storage = service.get_storage(request);
    match storage
        .replace_submission_file(submission_id, &file.file_name, file.data)
        .await
    {
        Ok(submission) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            SubmissionResponse::from(submission),
            "Submission updated successfully",
        ))),
        Err(e) => Ok(ApiResponse::from_portal_error(
            &e,
            ErrorCode::SubmissionUpdateFailed,
        )),
    }
}
