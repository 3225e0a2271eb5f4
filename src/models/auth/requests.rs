use serde::Deserialize;

// OAuth2 授权码回调参数
#[derive(Debug, Clone, Deserialize)]
pub struct AuthorizationCallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}
