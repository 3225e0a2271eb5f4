//! Keycloak 访问令牌校验
//!
//! 生产环境通过 realm 的 JWKS 获取公钥（RS256 等非对称算法），公钥集合使用 moka 缓存；
//! 测试环境可以使用固定密钥。

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use actix_web::cookie::{Cookie, SameSite};
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, decode_header};
use moka::future::Cache;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::errors::{PortalError, Result};
use crate::models::auth::Principal;

const JWKS_CACHE_KEY: &str = "jwks";

// 允许的非对称签名算法
const ASYMMETRIC_ALGORITHMS: &[Algorithm] = &[
    Algorithm::RS256,
    Algorithm::RS384,
    Algorithm::RS512,
    Algorithm::PS256,
    Algorithm::PS384,
    Algorithm::PS512,
    Algorithm::ES256,
    Algorithm::ES384,
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleClaim {
    #[serde(default)]
    pub roles: Vec<String>,
}

// Keycloak 访问令牌中用到的声明
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeycloakClaims {
    #[serde(default)]
    pub sub: String,
    pub exp: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realm_access: Option<RoleClaim>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_access: Option<HashMap<String, RoleClaim>>,
}

impl KeycloakClaims {
    /// 转换为请求主体：realm 角色在前，随后是指定 client 的角色
    pub fn into_principal(self, client_id: &str, access_token: &str) -> Principal {
        let mut authorities: Vec<String> = self
            .realm_access
            .map(|access| access.roles)
            .unwrap_or_default();

        if let Some(client_roles) = self
            .resource_access
            .and_then(|mut resources| resources.remove(client_id))
        {
            for role in client_roles.roles {
                if !authorities.contains(&role) {
                    authorities.push(role);
                }
            }
        }

        Principal {
            subject: self.sub,
            email: self.email,
            name: self.name.or(self.preferred_username),
            authorities,
            access_token: access_token.to_string(),
        }
    }
}

enum KeySource {
    Jwks {
        url: String,
        issuer: String,
        http: reqwest::Client,
        cache: Cache<String, Arc<JwkSet>>,
    },
    Static {
        key: DecodingKey,
        algorithm: Algorithm,
    },
}

/// 访问令牌校验器，放在 app_data 中共享
pub struct TokenValidator {
    source: KeySource,
    client_id: String,
}

impl TokenValidator {
    /// 使用 realm JWKS 校验令牌
    pub fn from_jwks(
        jwks_url: impl Into<String>,
        issuer: impl Into<String>,
        client_id: impl Into<String>,
        cache_ttl: Duration,
        request_timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| PortalError::configuration(format!("failed to create HTTP client: {e}")))?;

        let cache = Cache::builder()
            .max_capacity(1)
            .time_to_live(cache_ttl)
            .build();

        Ok(Self {
            source: KeySource::Jwks {
                url: jwks_url.into(),
                issuer: issuer.into(),
                http,
                cache,
            },
            client_id: client_id.into(),
        })
    }

    /// 按全局配置创建校验器
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let realm_url = config.realm_url();
        Self::from_jwks(
            format!("{realm_url}/protocol/openid-connect/certs"),
            realm_url,
            &config.keycloak.client_id,
            Duration::from_secs(config.keycloak.jwks_cache_ttl),
            Duration::from_secs(config.keycloak.request_timeout),
        )
    }

    /// 使用固定密钥校验令牌
    pub fn with_static_key(
        key: DecodingKey,
        algorithm: Algorithm,
        client_id: impl Into<String>,
    ) -> Self {
        Self {
            source: KeySource::Static { key, algorithm },
            client_id: client_id.into(),
        }
    }

    /// 校验令牌并返回请求主体
    pub async fn validate(&self, token: &str) -> Result<Principal> {
        let claims = match &self.source {
            KeySource::Static { key, algorithm } => {
                let mut validation = Validation::new(*algorithm);
                validation.validate_aud = false;
                decode::<KeycloakClaims>(token, key, &validation)
                    .map_err(|e| PortalError::authentication(format!("Invalid token: {e}")))?
                    .claims
            }
            KeySource::Jwks {
                url,
                issuer,
                http,
                cache,
            } => {
                let header = decode_header(token)
                    .map_err(|e| PortalError::authentication(format!("Invalid token: {e}")))?;
                if !ASYMMETRIC_ALGORITHMS.contains(&header.alg) {
                    return Err(PortalError::authentication(format!(
                        "Unsupported token algorithm: {:?}",
                        header.alg
                    )));
                }
                let kid = header
                    .kid
                    .ok_or_else(|| PortalError::authentication("Token has no key id"))?;

                let jwks = Self::load_jwks(url, http, cache).await?;
                let jwk = match jwks.find(&kid) {
                    Some(jwk) => jwk.clone(),
                    None => {
                        // 密钥可能已轮换，强制刷新一次
                        info!("Key {} not in cached JWKS, refreshing", kid);
                        cache.invalidate(JWKS_CACHE_KEY).await;
                        Self::load_jwks(url, http, cache)
                            .await?
                            .find(&kid)
                            .cloned()
                            .ok_or_else(|| {
                                PortalError::authentication(format!("Unknown signing key: {kid}"))
                            })?
                    }
                };

                let key = DecodingKey::from_jwk(&jwk)
                    .map_err(|e| PortalError::authentication(format!("Invalid signing key: {e}")))?;
                let mut validation = Validation::new(header.alg);
                validation.validate_aud = false;
                validation.set_issuer(&[issuer.as_str()]);

                decode::<KeycloakClaims>(token, &key, &validation)
                    .map_err(|e| PortalError::authentication(format!("Invalid token: {e}")))?
                    .claims
            }
        };

        Ok(claims.into_principal(&self.client_id, token))
    }

    async fn load_jwks(
        url: &str,
        http: &reqwest::Client,
        cache: &Cache<String, Arc<JwkSet>>,
    ) -> Result<Arc<JwkSet>> {
        cache
            .try_get_with(JWKS_CACHE_KEY.to_string(), async {
                debug!("Fetching JWKS from {}", url);
                let response = http
                    .get(url)
                    .send()
                    .await
                    .map_err(|e| PortalError::upstream(format!("JWKS request failed: {e}")))?
                    .error_for_status()
                    .map_err(|e| PortalError::upstream(format!("JWKS request failed: {e}")))?;
                let jwks = response
                    .json::<JwkSet>()
                    .await
                    .map_err(|e| PortalError::upstream(format!("Invalid JWKS document: {e}")))?;
                Ok::<_, PortalError>(Arc::new(jwks))
            })
            .await
            .map_err(|e: Arc<PortalError>| (*e).clone())
    }
}

/// 创建会话 Cookie（保存访问令牌）
pub fn create_session_cookie(access_token: &str, max_age_secs: i64) -> Cookie<'static> {
    let config = AppConfig::get();
    Cookie::build(config.portal.session_cookie.clone(), access_token.to_string())
        .path("/")
        .max_age(actix_web::cookie::time::Duration::seconds(max_age_secs))
        .same_site(SameSite::Lax)
        .http_only(true)
        .secure(config.is_production())
        .finish()
}

/// 创建空的会话 Cookie（用于登出）
pub fn create_empty_session_cookie() -> Cookie<'static> {
    let config = AppConfig::get();
    Cookie::build(config.portal.session_cookie.clone(), "")
        .path("/")
        .max_age(actix_web::cookie::time::Duration::seconds(0))
        .same_site(SameSite::Lax)
        .http_only(true)
        .secure(config.is_production())
        .finish()
}
