use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SubmissionService;
use super::upload::read_file_field;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, submissions::responses::SubmissionResponse};

pub async fn create_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    let owner_email = match RequireJWT::extract_user_email(request) {
        Some(email) => email,
        None => {
            return Ok(
                HttpResponse::Unauthorized().json(ApiResponse::<()>::error_empty(
                    ErrorCode::UserEmailInvalid,
                    "The current user has no email address",
                )),
            );
        }
    };

    let file = match read_file_field(payload).await? {
        Ok(file) => file,
        Err(response) => return Ok(response),
    };

    let storage = service.get_storage(request);
    match storage
        .create_submission(&owner_email, &file.file_name, file.data)
        .await
    {
        Ok(submission) => {
            info!(
                "Submission {} created by {} ({})",
                submission.id, owner_email, submission.file_name
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                SubmissionResponse::from(submission),
                "Submission uploaded successfully",
            )))
        }
        Err(e) => Ok(ApiResponse::from_portal_error(
            &e,
            ErrorCode::SubmissionCreateFailed,
        )),
    }
}
