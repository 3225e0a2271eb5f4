use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::StudentService;
use crate::errors::PortalError;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, accounts::responses::StudentListResponse};

pub async fn list_students(
    service: &StudentService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let token = RequireJWT::extract_access_token(request);
    let classifier = service.get_classifier(request);

    match classifier.list_students(token.as_deref()).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            StudentListResponse { items },
            "Students retrieved successfully",
        ))),
        Err(e) => {
            error!("Failed to list students: {}", e);
            let code = match &e {
                PortalError::Authentication(_) => ErrorCode::Unauthorized,
                PortalError::Configuration(_) => ErrorCode::IdentityClientNotFound,
                _ => ErrorCode::StudentListFailed,
            };
            Ok(HttpResponse::build(e.status_code()).json(ApiResponse::<()>::error_empty(
                code,
                "There was a problem retrieving the students.",
            )))
        }
    }
}
