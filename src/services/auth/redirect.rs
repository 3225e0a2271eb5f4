use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::header};
use tracing::debug;

use super::AuthService;
use crate::config::PortalConfig;
use crate::middlewares::RequireJWT;
use crate::models::auth::Principal;

pub const ROLE_LECTURER: &str = "lecturer";
pub const ROLE_STUDENT: &str = "student";

/// 按权限选择跳转目标，讲师优先
pub fn select_redirect<'a>(principal: Option<&Principal>, portal: &'a PortalConfig) -> &'a str {
    let Some(principal) = principal else {
        return &portal.login_fallback_url;
    };

    if principal.has_authority(ROLE_LECTURER) {
        &portal.lecturer_page
    } else if principal.has_authority(ROLE_STUDENT) {
        &portal.student_page
    } else {
        &portal.login_fallback_url
    }
}

pub async fn handle_redirect(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let principal = RequireJWT::extract_principal(request);
    let target = select_redirect(principal.as_ref(), &service.get_config().portal);
    debug!("Redirecting to {}", target);

    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, target))
        .finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn portal() -> PortalConfig {
        PortalConfig {
            public_url: "http://localhost:8081/".to_string(),
            lecturer_page: "/lecturer/list.html".to_string(),
            student_page: "/student/list.html".to_string(),
            login_fallback_url: "http://localhost:8081/login/oauth2/code/keycloak".to_string(),
            session_cookie: "LVA_SESSION".to_string(),
        }
    }

    fn caller(names: &[&str]) -> Principal {
        Principal {
            subject: "user-1".to_string(),
            email: None,
            name: None,
            authorities: names.iter().map(|n| n.to_string()).collect(),
            access_token: String::new(),
        }
    }

    #[test]
    fn test_lecturer_wins_over_student() {
        let portal = portal();
        assert_eq!(
            select_redirect(Some(&caller(&["student", "lecturer"])), &portal),
            "/lecturer/list.html"
        );
    }

    #[test]
    fn test_student_page() {
        let portal = portal();
        assert_eq!(
            select_redirect(Some(&caller(&["offline_access", "student"])), &portal),
            "/student/list.html"
        );
    }

    #[test]
    fn test_fallback_without_matching_role_or_caller() {
        let portal = portal();
        assert_eq!(
            select_redirect(Some(&caller(&["default-roles-lvaservice"])), &portal),
            portal.login_fallback_url
        );
        assert_eq!(select_redirect(None, &portal), portal.login_fallback_url);
        assert_eq!(
            select_redirect(Some(&caller(&[])), &portal),
            portal.login_fallback_url
        );
    }
}
