#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use actix_web::web;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, encode};

use lva_submission_portal::config::DatabaseConfig;
use lva_submission_portal::errors::{PortalError, Result};
use lva_submission_portal::identity::IdentityProvider;
use lva_submission_portal::models::accounts::entities::{
    AccountRecord, ClientRepresentation, RoleRepresentation,
};
use lva_submission_portal::routes;
use lva_submission_portal::storage::{Storage, sea_orm_storage::SeaOrmStorage};
use lva_submission_portal::utils::jwt::{KeycloakClaims, RoleClaim, TokenValidator};
use lva_submission_portal::utils::{json_error_handler, query_error_handler};

pub const CLIENT_ID: &str = "lva-portal";
pub const BOUNDARY: &str = "----lva-test-boundary";
const SECRET: &[u8] = b"integration-test-secret";

/// 内存中的身份提供方
#[derive(Default)]
pub struct FakeIdentityProvider {
    pub users: Vec<AccountRecord>,
    pub clients: Vec<ClientRepresentation>,
    pub realm_roles: HashMap<String, Vec<String>>,
    pub client_roles: HashMap<String, Vec<String>>,
    pub deleted: Mutex<Vec<String>>,
}

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

pub fn account(id: &str, email: &str) -> AccountRecord {
    AccountRecord {
        id: id.to_string(),
        username: id.to_string(),
        email: Some(email.to_string()),
        first_name: None,
        last_name: None,
        enabled: true,
        email_verified: true,
        created_timestamp: Some(1_700_000_000_000),
        extra: Default::default(),
    }
}

impl FakeIdentityProvider {
    /// tom 为默认注册用户，lukas 有 student 角色，lena 是讲师
    pub fn classroom() -> Self {
        let mut provider = Self {
            users: vec![
                account("tom", "tom@gmail.com"),
                account("lena", "lena@jku.at"),
                account("lukas", "lukas@gmail.com"),
            ],
            clients: vec![ClientRepresentation {
                id: "portal-uuid".to_string(),
                client_id: CLIENT_ID.to_string(),
                name: None,
                enabled: true,
            }],
            ..Default::default()
        };
        provider
            .realm_roles
            .insert("tom".to_string(), vec!["default-roles-lvaservice".to_string()]);
        provider
            .client_roles
            .insert("lukas".to_string(), vec!["student".to_string()]);
        provider
            .client_roles
            .insert("lena".to_string(), vec!["lecturer".to_string()]);
        provider
    }
}

#[async_trait::async_trait]
impl IdentityProvider for FakeIdentityProvider {
    async fn list_users(&self, _token: &str) -> Result<Vec<AccountRecord>> {
        Ok(self.users.clone())
    }

    async fn list_clients(&self, _token: &str) -> Result<Vec<ClientRepresentation>> {
        Ok(self.clients.clone())
    }

    async fn realm_role_mappings(
        &self,
        _token: &str,
        user_id: &str,
    ) -> Result<Vec<RoleRepresentation>> {
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
        _client_uuid: &str,
    ) -> Result<Vec<RoleRepresentation>> {
        Ok(self
            .client_roles
            .get(user_id)
            .map(|names| names.iter().map(|n| role(n)).collect())
            .unwrap_or_default())
    }

    async fn delete_user(&self, _token: &str, user_id: &str) -> Result<()> {
        if !self.users.iter().any(|u| u.id == user_id) {
            return Err(PortalError::not_found(format!("users/{user_id} not found")));
        }
        self.deleted.lock().unwrap().push(user_id.to_string());
        Ok(())
    }
}

pub struct TestContext {
    pub storage: Arc<dyn Storage>,
    pub provider: Arc<dyn IdentityProvider>,
    pub validator: web::Data<TokenValidator>,
}

impl TestContext {
    pub async fn new() -> Self {
        Self::with_provider(Arc::new(FakeIdentityProvider::classroom())).await
    }

    pub async fn with_provider(provider: Arc<dyn IdentityProvider>) -> Self {
        let database = DatabaseConfig {
            url: ":memory:".to_string(),
            pool_size: 1,
            timeout: 5,
        };
        let storage = SeaOrmStorage::connect(&database)
            .await
            .expect("in-memory database should open");

        Self {
            storage: Arc::new(storage),
            provider,
            validator: web::Data::new(TokenValidator::with_static_key(
                DecodingKey::from_secret(SECRET),
                Algorithm::HS256,
                CLIENT_ID,
            )),
        }
    }

    /// 与 main.rs 相同的应用数据与路由
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::QueryConfig::default().error_handler(query_error_handler))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::Data::new(self.storage.clone()))
            .app_data(web::Data::new(self.provider.clone()))
            .app_data(self.validator.clone())
            .configure(routes::configure_auth_routes)
            .configure(routes::configure_submission_routes)
            .configure(routes::configure_student_routes)
            .configure(routes::configure_frontend_routes);
    }
}

/// 签发测试用访问令牌
pub fn token(email: &str, realm_roles: &[&str], client_roles: &[&str]) -> String {
    let mut resource_access = HashMap::new();
    resource_access.insert(
        CLIENT_ID.to_string(),
        RoleClaim {
            roles: client_roles.iter().map(|r| r.to_string()).collect(),
        },
    );
    sign(&KeycloakClaims {
        sub: format!("sub-{email}"),
        exp: (chrono::Utc::now().timestamp() + 600) as usize,
        email: Some(email.to_string()),
        preferred_username: Some(email.split('@').next().unwrap_or_default().to_string()),
        realm_access: Some(RoleClaim {
            roles: realm_roles.iter().map(|r| r.to_string()).collect(),
        }),
        resource_access: Some(resource_access),
        ..Default::default()
    })
}

pub fn sign(claims: &KeycloakClaims) -> String {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(SECRET),
    )
    .unwrap()
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}

/// 构造 multipart 请求体，每项为 (字段名, 文件名, 内容)
pub fn multipart_parts(parts: &[(&str, &str, &[u8])]) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    for (name, file_name, data) in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                 Content-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    (format!("multipart/form-data; boundary={BOUNDARY}"), body)
}

/// 构造只含一个 file 字段的 multipart 请求体
pub fn multipart_file(file_name: &str, data: &[u8]) -> (String, Vec<u8>) {
    multipart_parts(&[("file", file_name, data)])
}
