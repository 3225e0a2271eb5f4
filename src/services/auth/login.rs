//! OAuth2 授权码登录（Keycloak）
//!
//! - `/oauth2/authorization/keycloak` 生成授权地址，CSRF 与 PKCE 状态写入短期 Cookie
//! - `/login/oauth2/code/keycloak` 校验状态、换取令牌，把访问令牌写入会话 Cookie

use actix_web::cookie::{Cookie, SameSite};
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::header};
use oauth2::basic::BasicClient;
use oauth2::{
    AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, PkceCodeChallenge,
    PkceCodeVerifier, RedirectUrl, Scope, TokenResponse, TokenUrl,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use super::AuthService;
use crate::config::AppConfig;
use crate::errors::{PortalError, Result};
use crate::models::auth::requests::AuthorizationCallbackQuery;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::jwt::create_session_cookie;

const LOGIN_STATE_COOKIE: &str = "LVA_OAUTH_STATE";
const LOGIN_START_PATH: &str = "/oauth2/authorization/keycloak";
const CALLBACK_PATH: &str = "login/oauth2/code/keycloak";
const AFTER_LOGIN_PATH: &str = "/redirectBasedOnRole";
const DEFAULT_SESSION_SECS: u64 = 300;

// 登录过程中保存的状态
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoginState {
    csrf_token: String,
    pkce_verifier: String,
}

/// Keycloak 端点
struct LoginEndpoints {
    client_id: String,
    client_secret: String,
    auth_url: AuthUrl,
    token_url: TokenUrl,
    redirect_url: RedirectUrl,
}

impl LoginEndpoints {
    fn from_config(config: &AppConfig) -> Result<Self> {
        let realm_url = config.realm_url();
        let public_url = config.portal.public_url.trim_end_matches('/');

        Ok(Self {
            client_id: config.keycloak.client_id.clone(),
            client_secret: config.keycloak.client_secret.clone(),
            auth_url: AuthUrl::new(format!("{realm_url}/protocol/openid-connect/auth"))
                .map_err(|e| PortalError::configuration(format!("invalid auth URL: {e}")))?,
            token_url: TokenUrl::new(format!("{realm_url}/protocol/openid-connect/token"))
                .map_err(|e| PortalError::configuration(format!("invalid token URL: {e}")))?,
            redirect_url: RedirectUrl::new(format!("{public_url}/{CALLBACK_PATH}"))
                .map_err(|e| PortalError::configuration(format!("invalid redirect URL: {e}")))?,
        })
    }

    fn client_secret(&self) -> Option<ClientSecret> {
        if self.client_secret.is_empty() {
            None
        } else {
            Some(ClientSecret::new(self.client_secret.clone()))
        }
    }

    /// 生成授权地址与需要保存的状态
    fn authorization_url(&self) -> (String, LoginState) {
        let mut client = BasicClient::new(ClientId::new(self.client_id.clone()))
            .set_auth_uri(self.auth_url.clone())
            .set_redirect_uri(self.redirect_url.clone());
        if let Some(secret) = self.client_secret() {
            client = client.set_client_secret(secret);
        }

        let (pkce_challenge, pkce_verifier) = PkceCodeChallenge::new_random_sha256();
        let (auth_url, csrf_token) = client
            .authorize_url(CsrfToken::new_random)
            .add_scope(Scope::new("openid".to_string()))
            .add_scope(Scope::new("profile".to_string()))
            .add_scope(Scope::new("email".to_string()))
            .set_pkce_challenge(pkce_challenge)
            .url();

        let state = LoginState {
            csrf_token: csrf_token.secret().clone(),
            pkce_verifier: pkce_verifier.secret().clone(),
        };
        (auth_url.to_string(), state)
    }

    /// 用授权码换取访问令牌，返回令牌与有效期（秒）
    async fn exchange_code(&self, code: &str, pkce_verifier: &str) -> Result<(String, u64)> {
        let http_client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| PortalError::configuration(format!("HTTP client error: {e}")))?;

        let mut client = BasicClient::new(ClientId::new(self.client_id.clone()))
            .set_token_uri(self.token_url.clone())
            .set_redirect_uri(self.redirect_url.clone());
        if let Some(secret) = self.client_secret() {
            client = client.set_client_secret(secret);
        }

        let token = client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .set_pkce_verifier(PkceCodeVerifier::new(pkce_verifier.to_string()))
            .request_async(&http_client)
            .await
            .map_err(|e| PortalError::authentication(format!("Token exchange failed: {e}")))?;

        let expires_in = token
            .expires_in()
            .map(|d| d.as_secs())
            .unwrap_or(DEFAULT_SESSION_SECS);
        Ok((token.access_token().secret().clone(), expires_in))
    }
}

fn state_cookie(value: String, max_age_secs: i64) -> Cookie<'static> {
    Cookie::build(LOGIN_STATE_COOKIE, value)
        .path("/")
        .max_age(actix_web::cookie::time::Duration::seconds(max_age_secs))
        .same_site(SameSite::Lax)
        .http_only(true)
        .secure(AppConfig::get().is_production())
        .finish()
}

fn redirect_to(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location.to_string()))
        .finish()
}

pub async fn handle_start(service: &AuthService) -> ActixResult<HttpResponse> {
    let endpoints = match LoginEndpoints::from_config(service.get_config()) {
        Ok(endpoints) => endpoints,
        Err(e) => {
            error!("Login is not configured: {}", e);
            return Ok(ApiResponse::from_portal_error(&e, ErrorCode::AuthFailed));
        }
    };

    let (auth_url, state) = endpoints.authorization_url();
    let state_json = match serde_json::to_string(&state) {
        Ok(json) => json,
        Err(e) => {
            return Ok(ApiResponse::from_portal_error(
                &PortalError::from(e),
                ErrorCode::AuthFailed,
            ));
        }
    };

    Ok(HttpResponse::Found()
        .cookie(state_cookie(state_json, 600))
        .insert_header((header::LOCATION, auth_url))
        .finish())
}

pub async fn handle_callback(
    service: &AuthService,
    request: &HttpRequest,
    query: AuthorizationCallbackQuery,
) -> ActixResult<HttpResponse> {
    if let Some(err) = &query.error {
        warn!("Identity provider returned login error: {}", err);
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::<()>::error_empty(
            ErrorCode::AuthFailed,
            format!("Login failed: {err}"),
        )));
    }

    // 没有授权码时重新发起登录
    let Some(code) = query.code.as_deref() else {
        return Ok(redirect_to(LOGIN_START_PATH));
    };

    let state: Option<LoginState> = request
        .cookie(LOGIN_STATE_COOKIE)
        .and_then(|c| serde_json::from_str(c.value()).ok());
    let Some(state) = state else {
        return Ok(redirect_to(LOGIN_START_PATH));
    };

    if query.state.as_deref() != Some(state.csrf_token.as_str()) {
        warn!("Login state mismatch");
        return Ok(HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty(
            ErrorCode::LoginStateInvalid,
            "Invalid login state",
        )));
    }

    let endpoints = match LoginEndpoints::from_config(service.get_config()) {
        Ok(endpoints) => endpoints,
        Err(e) => return Ok(ApiResponse::from_portal_error(&e, ErrorCode::AuthFailed)),
    };

    match endpoints.exchange_code(code, &state.pkce_verifier).await {
        Ok((access_token, expires_in)) => {
            info!("Login completed, session valid for {} s", expires_in);
            Ok(HttpResponse::Found()
                .cookie(create_session_cookie(&access_token, expires_in as i64))
                .cookie(state_cookie(String::new(), 0))
                .insert_header((header::LOCATION, AFTER_LOGIN_PATH))
                .finish())
        }
        Err(e) => {
            warn!("Login failed: {}", e);
            Ok(ApiResponse::from_portal_error(&e, ErrorCode::AuthFailed))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorization_url_carries_pkce_and_state() {
        let endpoints = LoginEndpoints {
            client_id: "lva-portal".to_string(),
            client_secret: String::new(),
            auth_url: AuthUrl::new(
                "http://localhost:8080/realms/LVAservice/protocol/openid-connect/auth".to_string(),
            )
            .unwrap(),
            token_url: TokenUrl::new(
                "http://localhost:8080/realms/LVAservice/protocol/openid-connect/token".to_string(),
            )
            .unwrap(),
            redirect_url: RedirectUrl::new(
                "http://localhost:8081/login/oauth2/code/keycloak".to_string(),
            )
            .unwrap(),
        };

        let (url, state) = endpoints.authorization_url();
        assert!(url.starts_with(
            "http://localhost:8080/realms/LVAservice/protocol/openid-connect/auth?"
        ));
        assert!(url.contains("client_id=lva-portal"));
        assert!(url.contains("code_challenge_method=S256"));
        assert!(url.contains(&format!("state={}", state.csrf_token)));
        assert!(!state.pkce_verifier.is_empty());
    }
}
