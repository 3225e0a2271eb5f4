use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::auth::requests::AuthorizationCallbackQuery;
use crate::services::AuthService;

// 懒加载的全局 AuthService 实例
static AUTH_SERVICE: Lazy<AuthService> = Lazy::new(AuthService::new_lazy);

pub async fn get_user(request: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.get_user(&request).await
}

pub async fn redirect_based_on_role(request: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.redirect_based_on_role(&request).await
}

pub async fn start_login() -> ActixResult<HttpResponse> {
    AUTH_SERVICE.start_login().await
}

pub async fn login_callback(
    request: HttpRequest,
    query: web::Query<AuthorizationCallbackQuery>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE
        .login_callback(&request, query.into_inner())
        .await
}

pub async fn logout() -> ActixResult<HttpResponse> {
    AUTH_SERVICE.logout().await
}

// 配置路由
pub fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/user")
            .wrap(middlewares::RequireJWT::strict())
            .route(web::get().to(get_user)),
    )
    .service(
        web::resource("/redirectBasedOnRole")
            .wrap(middlewares::RequireJWT::allow_anonymous())
            .route(web::get().to(redirect_based_on_role)),
    )
    .route("/oauth2/authorization/keycloak", web::get().to(start_login))
    .route("/login/oauth2/code/keycloak", web::get().to(login_callback))
    .route("/logout", web::get().to(logout));
}
