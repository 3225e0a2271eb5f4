//! 学生账号分类
//!
//! 账号满足以下任一条件即视为学生：
//! - realm 角色包含默认注册角色（例如 `default-roles-lvaservice`）
//! - 本应用 client 下的角色包含 `student`
//!
//! 分类结果不缓存，每次列表请求都重新获取角色。

use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::KeycloakConfig;
use crate::errors::{PortalError, Result};
use crate::identity::IdentityProvider;
use crate::models::accounts::entities::{AccountRecord, AccountRoles};

/// 按角色判断账号是否为学生
pub fn is_student(roles: &AccountRoles, realm_sentinel: &str, client_role: &str) -> bool {
    roles.realm_roles.iter().any(|r| r == realm_sentinel)
        || roles.client_roles.iter().any(|r| r == client_role)
}

#[derive(Clone)]
pub struct StudentClassifier {
    provider: Arc<dyn IdentityProvider>,
    client_id: String,
    realm_sentinel: String,
    client_role: String,
}

impl StudentClassifier {
    pub fn new(
        provider: Arc<dyn IdentityProvider>,
        client_id: impl Into<String>,
        realm_sentinel: impl Into<String>,
        client_role: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            client_id: client_id.into(),
            realm_sentinel: realm_sentinel.into(),
            client_role: client_role.into(),
        }
    }

    pub fn from_config(provider: Arc<dyn IdentityProvider>, config: &KeycloakConfig) -> Self {
        Self::new(
            provider,
            &config.client_id,
            &config.student_realm_role,
            &config.student_client_role,
        )
    }

    // 列表过程中身份提供方的失败统一视为上游错误，认证失败除外
    fn upstream_failure(err: PortalError) -> PortalError {
        match err {
            PortalError::Authentication(_) | PortalError::Upstream(_) => err,
            other => PortalError::upstream(other.message()),
        }
    }

    fn require_token(token: Option<&str>) -> Result<&str> {
        match token.map(str::trim) {
            Some(t) if !t.is_empty() => Ok(t),
            _ => Err(PortalError::authentication("Missing bearer credential")),
        }
    }

    /// 列出全部学生账号，保持身份提供方返回的顺序
    ///
    /// 任一账号的角色获取失败都会中止整个列表，不返回部分结果。
    pub async fn list_students(&self, token: Option<&str>) -> Result<Vec<AccountRecord>> {
        let token = Self::require_token(token)?;

        let accounts = self
            .provider
            .list_users(token)
            .await
            .map_err(Self::upstream_failure)?;

        let client_uuid = self
            .provider
            .list_clients(token)
            .await
            .map_err(Self::upstream_failure)?
            .into_iter()
            .find(|c| c.client_id == self.client_id)
            .map(|c| c.id)
            .ok_or_else(|| {
                warn!("Client '{}' not found in realm", self.client_id);
                PortalError::configuration(format!("client not found: {}", self.client_id))
            })?;

        let mut students = Vec::new();
        // 逐个账号顺序获取，先 realm 角色再 client 角色
        for account in accounts {
            let realm = self
                .provider
                .realm_role_mappings(token, &account.id)
                .await
                .map_err(Self::upstream_failure)?;
            let client = self
                .provider
                .client_role_mappings(token, &account.id, &client_uuid)
                .await
                .map_err(Self::upstream_failure)?;
            let roles = AccountRoles::from_representations(realm, client);

            if is_student(&roles, &self.realm_sentinel, &self.client_role) {
                students.push(account);
            } else {
                debug!("Account {} is not a student", account.id);
            }
        }

        Ok(students)
    }

    /// 在身份提供方删除账号，本地不保留任何记录
    pub async fn delete_account(&self, token: Option<&str>, user_id: &str) -> Result<()> {
        let token = Self::require_token(token)?;
        self.provider.delete_user(token, user_id).await
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::accounts::entities::{ClientRepresentation, RoleRepresentation};
    use std::collections::HashMap;
    use std::sync::Mutex;

    fn role(name: &str) -> RoleRepresentation {
        RoleRepresentation {
            id: None,
            name: name.to_string(),
            description: None,
            composite: false,
            client_role: false,
            container_id: None,
        }
    }

    fn account(id: &str) -> AccountRecord {
        AccountRecord {
            id: id.to_string(),
            username: id.to_string(),
            email: Some(format!("{id}@x.com")),
            first_name: None,
            last_name: None,
            enabled: true,
            email_verified: true,
            created_timestamp: None,
            extra: Default::default(),
        }
    }

    /// 内存中的身份提供方
    #[derive(Default)]
    pub(crate) struct FakeProvider {
        pub users: Vec<AccountRecord>,
        pub clients: Vec<ClientRepresentation>,
        pub realm_roles: HashMap<String, Vec<String>>,
        pub client_roles: HashMap<String, Vec<String>>,
        pub failing_user: Option<(String, PortalError)>,
        pub calls: Mutex<Vec<String>>,
    }

    impl FakeProvider {
        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }

        pub(crate) fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait::async_trait]
    impl IdentityProvider for FakeProvider {
        async fn list_users(&self, _token: &str) -> Result<Vec<AccountRecord>> {
            self.record("users".to_string());
            Ok(self.users.clone())
        }

        async fn list_clients(&self, _token: &str) -> Result<Vec<ClientRepresentation>> {
            self.record("clients".to_string());
            Ok(self.clients.clone())
        }

        async fn realm_role_mappings(
            &self,
            _token: &str,
            user_id: &str,
        ) -> Result<Vec<RoleRepresentation>> {
            self.record(format!("realm:{user_id}"));
            if let Some((failing, err)) = &self.failing_user
                && failing == user_id
            {
                return Err(err.clone());
            }
            Ok(self
                .realm_roles
                .get(user_id)
                .map(|names| names.iter().map(|n| role(n)).collect())
                .unwrap_or_default())
        }

        async fn client_role_mappings(
            &self,
            _token: &str,
            user_id: &str,
            client_uuid: &str,
        ) -> Result<Vec<RoleRepresentation>> {
            self.record(format!("client:{user_id}:{client_uuid}"));
            Ok(self
                .client_roles
                .get(user_id)
                .map(|names| names.iter().map(|n| role(n)).collect())
                .unwrap_or_default())
        }

        async fn delete_user(&self, _token: &str, user_id: &str) -> Result<()> {
            self.record(format!("delete:{user_id}"));
            if self.users.iter().any(|u| u.id == user_id) {
                Ok(())
            } else {
                Err(PortalError::not_found(format!("users/{user_id} not found")))
            }
        }
    }

    pub(crate) fn sample_provider() -> FakeProvider {
        let mut provider = FakeProvider {
            users: vec![account("alice"), account("bob"), account("carol"), account("dave")],
            clients: vec![
                ClientRepresentation {
                    id: "uuid-account".to_string(),
                    client_id: "account".to_string(),
                    name: None,
                    enabled: true,
                },
                ClientRepresentation {
                    id: "uuid-portal".to_string(),
                    client_id: "lva-portal".to_string(),
                    name: None,
                    enabled: true,
                },
            ],
            ..Default::default()
        };
        provider.realm_roles.insert(
            "alice".to_string(),
            vec!["offline_access".to_string(), "default-roles-lvaservice".to_string()],
        );
        provider
            .client_roles
            .insert("bob".to_string(), vec!["student".to_string()]);
        provider
            .client_roles
            .insert("carol".to_string(), vec!["lecturer".to_string()]);
        provider
    }

    fn classifier(provider: Arc<FakeProvider>) -> StudentClassifier {
        StudentClassifier::new(provider, "lva-portal", "default-roles-lvaservice", "student")
    }

    #[test]
    fn test_predicate_examples() {
        let sentinel = AccountRoles {
            realm_roles: vec!["default-roles-lvaservice".to_string()],
            client_roles: vec![],
        };
        let client_student = AccountRoles {
            realm_roles: vec![],
            client_roles: vec!["student".to_string()],
        };
        let neither = AccountRoles {
            realm_roles: vec!["offline_access".to_string()],
            client_roles: vec!["lecturer".to_string()],
        };

        assert!(is_student(&sentinel, "default-roles-lvaservice", "student"));
        assert!(is_student(&client_student, "default-roles-lvaservice", "student"));
        assert!(!is_student(&neither, "default-roles-lvaservice", "student"));
        assert!(!is_student(&AccountRoles::default(), "default-roles-lvaservice", "student"));
    }

    #[tokio::test]
    async fn test_list_students_keeps_provider_order() {
        let provider = Arc::new(sample_provider());
        let students = classifier(provider.clone())
            .list_students(Some("token"))
            .await
            .unwrap();

        let ids: Vec<&str> = students.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["alice", "bob"]);

        let calls = provider.calls.lock().unwrap().clone();
        assert_eq!(calls[0], "users");
        assert_eq!(calls[1], "clients");
        assert_eq!(calls[2], "realm:alice");
        assert_eq!(calls[3], "client:alice:uuid-portal");
    }

    #[tokio::test]
    async fn test_missing_token_makes_no_calls() {
        let provider = Arc::new(sample_provider());
        let classifier = classifier(provider.clone());

        let err = classifier.list_students(None).await.unwrap_err();
        assert!(matches!(err, PortalError::Authentication(_)));
        let err = classifier.list_students(Some("  ")).await.unwrap_err();
        assert!(matches!(err, PortalError::Authentication(_)));
        let err = classifier.delete_account(None, "alice").await.unwrap_err();
        assert!(matches!(err, PortalError::Authentication(_)));

        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_client_is_configuration_error() {
        let mut provider = sample_provider();
        provider.clients.retain(|c| c.client_id != "lva-portal");
        let provider = Arc::new(provider);

        let err = classifier(provider.clone())
            .list_students(Some("token"))
            .await
            .unwrap_err();
        assert!(matches!(err, PortalError::Configuration(_)));
        // 没有获取任何账号角色
        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test]
    async fn test_role_fetch_failure_aborts_listing() {
        let mut provider = sample_provider();
        provider.failing_user = Some((
            "bob".to_string(),
            PortalError::upstream("identity provider answered 500"),
        ));
        let provider = Arc::new(provider);

        let err = classifier(provider.clone())
            .list_students(Some("token"))
            .await
            .unwrap_err();
        assert!(matches!(err, PortalError::Upstream(_)));

        let calls = provider.calls.lock().unwrap().clone();
        assert!(!calls.iter().any(|c| c.contains("carol")));
    }

    #[tokio::test]
    async fn test_vanished_account_during_listing_is_upstream_error() {
        let mut provider = sample_provider();
        provider.failing_user = Some((
            "bob".to_string(),
            PortalError::not_found("users/bob/role-mappings/realm not found"),
        ));

        let err = classifier(Arc::new(provider))
            .list_students(Some("token"))
            .await
            .unwrap_err();
        assert!(matches!(err, PortalError::Upstream(_)));
        assert_eq!(err.status_code(), actix_web::http::StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_rejected_credential_stays_authentication_error() {
        let mut provider = sample_provider();
        provider.failing_user = Some((
            "alice".to_string(),
            PortalError::authentication("identity provider answered 401"),
        ));

        let err = classifier(Arc::new(provider))
            .list_students(Some("token"))
            .await
            .unwrap_err();
        assert!(matches!(err, PortalError::Authentication(_)));
    }

    #[tokio::test]
    async fn test_delete_account() {
        let provider = Arc::new(sample_provider());
        let classifier = classifier(provider.clone());

        classifier.delete_account(Some("token"), "dave").await.unwrap();
        let err = classifier
            .delete_account(Some("token"), "nobody")
            .await
            .unwrap_err();
        assert!(matches!(err, PortalError::NotFound(_)));
    }
}
