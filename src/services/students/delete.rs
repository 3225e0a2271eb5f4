use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::StudentService;
use crate::errors::PortalError;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};

pub async fn delete_account(
    service: &StudentService,
    request: &HttpRequest,
    user_id: String,
) -> ActixResult<HttpResponse> {
    let token = RequireJWT::extract_access_token(request);
    let classifier = service.get_classifier(request);

    match classifier.delete_account(token.as_deref(), &user_id).await {
        Ok(()) => {
            info!("Account {} deleted at the identity provider", user_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("User successfully deleted.")))
        }
        Err(PortalError::NotFound(_)) => Ok(HttpResponse::NotFound().json(
            ApiResponse::error_empty(ErrorCode::UserNotFound, "User not found"),
        )),
        Err(e) => {
            error!("Failed to delete account {}: {}", user_id, e);
            Ok(ApiResponse::from_portal_error(&e, ErrorCode::UserDeleteFailed))
        }
    }
}
