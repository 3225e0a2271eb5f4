use serde::{Deserialize, Serialize};

/// 当前请求的已认证用户
///
/// 由 RequireJWT 中间件在令牌校验通过后写入请求扩展。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principal {
    /// Keycloak 用户 ID（sub）
    pub subject: String,
    pub email: Option<String>,
    pub name: Option<String>,
    /// realm 角色在前，client 角色在后，保持令牌中的顺序
    pub authorities: Vec<String>,
    /// 原始访问令牌，用于代表用户调用 Keycloak 管理 API
    #[serde(skip_serializing, default)]
    pub access_token: String,
}

impl Principal {
    pub fn has_authority(&self, authority: &str) -> bool {
        self.authorities.iter().any(|a| a == authority)
    }

    /// 用户展示的主要角色（第一个权限），没有时为空字符串
    pub fn primary_role(&self) -> &str {
        self.authorities.first().map(String::as_str).unwrap_or("")
    }

    /// 可用于管理 API 的令牌，空令牌视为不存在
    pub fn bearer_token(&self) -> Option<&str> {
        let token = self.access_token.trim();
        if token.is_empty() { None } else { Some(token) }
    }
}
