pub mod login;
pub mod logout;
pub mod redirect;
pub mod user;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::config::AppConfig;
use crate::models::auth::requests::AuthorizationCallbackQuery;

pub struct AuthService;

impl AuthService {
    pub fn new_lazy() -> Self {
        Self
    }

    pub(crate) fn get_config(&self) -> &AppConfig {
        AppConfig::get()
    }

    // 当前用户信息
    pub async fn get_user(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        user::handle_get_user(self, request).await
    }

    // 按角色跳转
    pub async fn redirect_based_on_role(
        &self,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        redirect::handle_redirect(self, request).await
    }

    // 发起授权码登录
    pub async fn start_login(&self) -> ActixResult<HttpResponse> {
        login::handle_start(self).await
    }

    // 授权码回调
    pub async fn login_callback(
        &self,
        request: &HttpRequest,
        query: AuthorizationCallbackQuery,
    ) -> ActixResult<HttpResponse> {
        login::handle_callback(self, request, query).await
    }

    // 登出
    pub async fn logout(&self) -> ActixResult<HttpResponse> {
        logout::handle_logout(self).await
    }
}
