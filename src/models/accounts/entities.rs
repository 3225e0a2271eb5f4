//! Keycloak 管理 API 的数据结构
//!
//! 字段名与 Keycloak 的 JSON 表示保持一致（camelCase）。账号中未列出的字段原样保留在 `extra` 中。

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use ts_rs::TS;

// 账号（UserRepresentation）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/account.ts")]
pub struct AccountRecord {
    pub id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub email_verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_timestamp: Option<i64>,
    /// attributes、requiredActions 等其余字段
    #[serde(flatten)]
    #[ts(skip)]
    pub extra: Map<String, Value>,
}

// 角色（RoleRepresentation），realm 角色与 client 角色结构相同
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleRepresentation {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub composite: bool,
    #[serde(default)]
    pub client_role: bool,
    #[serde(default)]
    pub container_id: Option<String>,
}

// 注册的应用（ClientRepresentation）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRepresentation {
    /// Keycloak 内部 ID（UUID）
    pub id: String,
    /// 对外的 clientId
    pub client_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub enabled: bool,
}

/// 单个账号的角色分类结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountRoles {
    pub realm_roles: Vec<String>,
    pub client_roles: Vec<String>,
}

impl AccountRoles {
    pub fn from_representations(
        realm: Vec<RoleRepresentation>,
        client: Vec<RoleRepresentation>,
    ) -> Self {
        Self {
            realm_roles: realm.into_iter().map(|r| r.name).collect(),
            client_roles: client.into_iter().map(|r| r.name).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_keeps_unlisted_fields() {
        let json = serde_json::json!({
            "id": "u1",
            "username": "tom",
            "email": "tom@gmail.com",
            "enabled": true,
            "emailVerified": false,
            "totp": false,
            "attributes": { "matrikel": ["k1234567"] },
            "requiredActions": []
        });

        let account: AccountRecord = serde_json::from_value(json).unwrap();
        assert_eq!(account.username, "tom");
        assert!(!account.email_verified);
        assert_eq!(account.extra["attributes"]["matrikel"][0], "k1234567");
        assert!(!account.extra.contains_key("emailVerified"));

        let back = serde_json::to_value(&account).unwrap();
        assert_eq!(back["totp"], false);
        assert_eq!(back["requiredActions"], serde_json::json!([]));
        assert_eq!(back["emailVerified"], false);
    }

    #[test]
    fn test_client_representation_reads_client_id() {
        let client: ClientRepresentation = serde_json::from_value(serde_json::json!({
            "id": "9a1b",
            "clientId": "lva-portal",
            "publicClient": false
        }))
        .unwrap();
        assert_eq!(client.id, "9a1b");
        assert_eq!(client.client_id, "lva-portal");
    }
}
