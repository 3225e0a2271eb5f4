//! 身份提供方（Keycloak 管理 API）
//!
//! 所有调用都以当前用户的访问令牌作为凭据，服务端不保存管理员账号。

use std::sync::Arc;

use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::accounts::entities::{AccountRecord, ClientRepresentation, RoleRepresentation};

pub mod keycloak;

pub use keycloak::KeycloakAdminClient;

#[async_trait::async_trait]
pub trait IdentityProvider: Send + Sync {
    // 列出 realm 中全部账号
    async fn list_users(&self, token: &str) -> Result<Vec<AccountRecord>>;
    // 列出 realm 中注册的全部应用
    async fn list_clients(&self, token: &str) -> Result<Vec<ClientRepresentation>>;
    // 账号的 realm 角色
    async fn realm_role_mappings(
        &self,
        token: &str,
        user_id: &str,
    ) -> Result<Vec<RoleRepresentation>>;
    // 账号在指定应用（内部 UUID）下的角色
    async fn client_role_mappings(
        &self,
        token: &str,
        user_id: &str,
        client_uuid: &str,
    ) -> Result<Vec<RoleRepresentation>>;
    // 删除账号
    async fn delete_user(&self, token: &str, user_id: &str) -> Result<()>;
}

pub fn create_identity_provider() -> Result<Arc<dyn IdentityProvider>> {
    let config = AppConfig::get();
    let client = KeycloakAdminClient::new(
        config.admin_realm_url(),
        std::time::Duration::from_secs(config.keycloak.request_timeout),
    )?;
    Ok(Arc::new(client))
}
