/*!
 * JWT 认证中间件
 *
 * 校验 Keycloak 签发的访问令牌，并把解析出的 `Principal` 放入请求扩展。
 *
 * 令牌来源（按顺序）：
 * 1. 请求头 `Authorization: Bearer <token>`
 * 2. 登录后写入的会话 Cookie
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * web::scope("/submissions")
 *     .wrap(RequireJWT::strict())          // 未登录返回 401
 *     .route("/my", web::get().to(list_my));
 *
 * web::resource("/redirectBasedOnRole")
 *     .wrap(RequireJWT::allow_anonymous()) // 未登录也放行，由处理程序决定
 *     .route(web::get().to(redirect));
 * ```
 *
 * 处理程序中使用 `RequireJWT::extract_principal(&req)` 获取当前用户。
 */

use crate::config::AppConfig;
use crate::middlewares::create_error_response;
use crate::models::auth::Principal;
use crate::utils::jwt::TokenValidator;
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::{debug, error, info};

const BEARER_PREFIX: &str = "Bearer ";
const AUTHORIZATION_HEADER: &str = "Authorization";

#[derive(Clone, Copy, Debug, Default)]
pub struct RequireJWT {
    allow_anonymous: bool,
}

impl RequireJWT {
    /// 缺少或无效的令牌直接返回 401
    pub const fn strict() -> Self {
        Self {
            allow_anonymous: false,
        }
    }

    /// 缺少或无效的令牌时以匿名身份继续处理
    pub const fn allow_anonymous() -> Self {
        Self {
            allow_anonymous: true,
        }
    }
}

// 辅助函数：从请求头或 Cookie 中提取令牌
fn extract_token(req: &ServiceRequest) -> Option<String> {
    let from_header = req
        .headers()
        .get(AUTHORIZATION_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    from_header.or_else(|| {
        let cookie_name = &AppConfig::get().portal.session_cookie;
        req.cookie(cookie_name)
            .map(|c| c.value().to_string())
            .filter(|s| !s.is_empty())
    })
}

enum AuthOutcome {
    Authenticated(Principal),
    Rejected(String),
    Misconfigured,
}

async fn authenticate(req: &ServiceRequest) -> AuthOutcome {
    let Some(validator) = req.app_data::<web::Data<TokenValidator>>().cloned() else {
        error!("TokenValidator not found in app data");
        return AuthOutcome::Misconfigured;
    };

    let Some(token) = extract_token(req) else {
        return AuthOutcome::Rejected("Missing or invalid Authorization header".to_string());
    };

    match validator.validate(&token).await {
        Ok(principal) => AuthOutcome::Authenticated(principal),
        Err(err) => {
            info!("JWT token validation failed: {}", err);
            AuthOutcome::Rejected("Invalid JWT token".to_string())
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
            allow_anonymous: self.allow_anonymous,
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
    allow_anonymous: bool,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let allow_anonymous = self.allow_anonymous;
        Box::pin(async move {
            // 处理 OPTIONS 请求
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(
                    create_error_response(StatusCode::NO_CONTENT, "").map_into_right_body(),
                ));
            }

            match authenticate(&req).await {
                AuthOutcome::Authenticated(principal) => {
                    debug!("JWT authentication successful for subject: {}", principal.subject);
                    req.extensions_mut().insert(principal);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                AuthOutcome::Rejected(_) if allow_anonymous => {
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                AuthOutcome::Rejected(err) => {
                    info!(
                        "JWT authentication failed for request to {}: {}",
                        req.path(),
                        err
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            &format!("Unauthorized: {err}"),
                        )
                        .map_into_right_body(),
                    ))
                }
                AuthOutcome::Misconfigured => Ok(req.into_response(
                    create_error_response(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Authentication is not configured",
                    )
                    .map_into_right_body(),
                )),
            }
        })
    }
}

// 辅助函数：从请求中提取用户信息
impl RequireJWT {
    /// 从请求扩展中提取当前用户
    /// 此函数应该在应用了RequireJWT中间件的路由处理程序中使用
    pub fn extract_principal(req: &actix_web::HttpRequest) -> Option<Principal> {
        req.extensions().get::<Principal>().cloned()
    }

    /// 从请求扩展中提取用户邮箱
    pub fn extract_user_email(req: &actix_web::HttpRequest) -> Option<String> {
        req.extensions()
            .get::<Principal>()
            .and_then(|p| p.email.clone())
    }

    /// 从请求扩展中提取访问令牌
    pub fn extract_access_token(req: &actix_web::HttpRequest) -> Option<String> {
        req.extensions()
            .get::<Principal>()
            .and_then(|p| p.bearer_token().map(str::to_string))
    }
}
