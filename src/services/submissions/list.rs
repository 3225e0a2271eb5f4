use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, submissions::responses::SubmissionListResponse};

pub async fn list_my_submissions(
    service: &SubmissionService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    match RequireJWT::extract_user_email(request) {
        Some(email) => list_by_owner(service, request, &email).await,
        None => Ok(
            HttpResponse::Unauthorized().json(ApiResponse::<()>::error_empty(
                ErrorCode::UserEmailInvalid,
                "The current user has no email address",
            )),
        ),
    }
}

pub async fn list_user_submissions(
    service: &SubmissionService,
    request: &HttpRequest,
    email: String,
) -> ActixResult<HttpResponse> {
    list_by_owner(service, request, &email).await
}

async fn list_by_owner(
    service: &SubmissionService,
    request: &HttpRequest,
    email: &str,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_submissions_by_owner(email).await {
        Ok(submissions) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            SubmissionListResponse::from(submissions),
            "Submissions retrieved successfully",
        ))),
        Err(e) => Ok(ApiResponse::from_portal_error(
            &e,
            ErrorCode::InternalServerError,
        )),
    }
}
