use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::IdentityProvider;
use crate::errors::{PortalError, Result};
use crate::models::accounts::entities::{AccountRecord, ClientRepresentation, RoleRepresentation};

/// 基于 reqwest 的 Keycloak 管理 API 客户端
#[derive(Clone)]
pub struct KeycloakAdminClient {
    http: reqwest::Client,
    /// 例如 http://localhost:8080/admin/realms/LVAservice
    admin_url: String,
}

impl KeycloakAdminClient {
    pub fn new(admin_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| PortalError::configuration(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            admin_url: admin_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.admin_url, path)
    }

    async fn send(&self, method: Method, token: &str, path: &str) -> Result<reqwest::Response> {
        let url = self.endpoint(path);
        debug!("Keycloak admin request: {} {}", method, url);

        let response = self
            .http
            .request(method, &url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| PortalError::upstream(format!("request to {url} failed: {e}")))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        warn!("Keycloak admin API answered {} for {}: {}", status, url, body);
        Err(map_status(status, &url))
    }

    async fn get_json<T: DeserializeOwned>(&self, token: &str, path: &str) -> Result<T> {
        let response = self.send(Method::GET, token, path).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| PortalError::upstream(format!("invalid response from {path}: {e}")))
    }
}

/// 将管理 API 的失败状态码映射为错误类型
pub(crate) fn map_status(status: StatusCode, url: &str) -> PortalError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => PortalError::authentication(format!(
            "identity provider rejected the credential ({status})"
        )),
        StatusCode::NOT_FOUND => PortalError::not_found(format!("{url} not found")),
        _ => PortalError::upstream(format!("identity provider answered {status} for {url}")),
    }
}

#[async_trait::async_trait]
impl IdentityProvider for KeycloakAdminClient {
    async fn list_users(&self, token: &str) -> Result<Vec<AccountRecord>> {
        self.get_json(token, "users").await
    }

    async fn list_clients(&self, token: &str) -> Result<Vec<ClientRepresentation>> {
        self.get_json(token, "clients").await
    }

    async fn realm_role_mappings(
        &self,
        token: &str,
        user_id: &str,
    ) -> Result<Vec<RoleRepresentation>> {
        self.get_json(token, &format!("users/{user_id}/role-mappings/realm"))
            .await
    }

    async fn client_role_mappings(
        &self,
        token: &str,
        user_id: &str,
        client_uuid: &str,
    ) -> Result<Vec<RoleRepresentation>> {
        self.get_json(
            token,
            &format!("users/{user_id}/role-mappings/clients/{client_uuid}"),
        )
        .await
    }

    async fn delete_user(&self, token: &str, user_id: &str) -> Result<()> {
        self.send(Method::DELETE, token, &format!("users/{user_id}"))
            .await?;
        Ok(())
    }
}
