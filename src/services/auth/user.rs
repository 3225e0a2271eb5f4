use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AuthService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, auth::responses::UserInfoResponse};

pub async fn handle_get_user(
    _service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(principal) = RequireJWT::extract_principal(request) else {
        return Ok(
            HttpResponse::Unauthorized().json(ApiResponse::<()>::error_empty(
                ErrorCode::Unauthorized,
                "Not logged in",
            )),
        );
    };

    let response = UserInfoResponse {
        role: principal.primary_role().to_string(),
        name: principal.name.clone().unwrap_or_default(),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "User retrieved successfully",
    )))
}
