use serde::{Deserialize, Serialize};

/// 应用配置结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub cors: CorsConfig,
    pub upload: UploadConfig,
    pub keycloak: KeycloakConfig,
    pub portal: PortalConfig,
    #[serde(default)]
    pub seed: SeedConfig,
}

/// 应用设置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub system_name: String,
    pub environment: String,
    pub log_level: String,
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub unix_socket_path: String,
    pub workers: usize,
    pub max_workers: usize,
    pub timeouts: TimeoutConfig,
    pub limits: LimitConfig,
}

/// 超时配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    pub client_request: u64,
    pub client_disconnect: u64,
    pub keep_alive: u64,
}

/// 限制配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitConfig {
    pub max_payload_size: usize,
}

/// 数据库配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,    // 数据库连接 URL（从 scheme 自动推断类型）
    pub pool_size: u32, // 连接池大小
    pub timeout: u64,   // 连接超时 (秒)
}

/// CORS 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_headers: Vec<String>,
    pub max_age: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    pub max_size: usize, // 单文件最大字节数
}

/// Keycloak 身份提供方配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeycloakConfig {
    /// 服务地址，例如 http://localhost:8080/
    pub server_url: String,
    pub realm: String,
    /// 本应用在 realm 中注册的 clientId
    pub client_id: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    pub client_secret: String,
    /// 视为“默认注册用户”的 realm 角色
    pub student_realm_role: String,
    /// 本应用 client 下的学生角色
    pub student_client_role: String,
    pub request_timeout: u64, // 管理 API 请求超时 (秒)
    pub jwks_cache_ttl: u64,  // JWKS 缓存时间 (秒)
}

/// 门户页面与会话配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalConfig {
    pub public_url: String,
    pub lecturer_page: String,
    pub student_page: String,
    pub login_fallback_url: String,
    pub session_cookie: String,
}

/// 演示数据配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedConfig {
    pub demo_submissions: bool,
}
