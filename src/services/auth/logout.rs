use actix_web::{HttpResponse, Result as ActixResult, http::header};

use super::AuthService;
use crate::utils::jwt::create_empty_session_cookie;

pub async fn handle_logout(service: &AuthService) -> ActixResult<HttpResponse> {
    let logout_url = service.get_config().logout_url();

    Ok(HttpResponse::Found()
        .cookie(create_empty_session_cookie())
        .insert_header((header::LOCATION, logout_url))
        .finish())
}
