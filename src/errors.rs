//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码、类型名称与 HTTP 状态码。

use actix_web::http::StatusCode;
use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - status_code() 方法 - 返回对应的 HTTP 状态码
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_portal_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal, $status:expr)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq)]
        pub enum PortalError {
            $($variant(String),)*
        }

        impl PortalError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(PortalError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(PortalError::$variant(_) => $type_name,)*
                }
            }

            /// 获取对应的 HTTP 状态码
            pub fn status_code(&self) -> StatusCode {
                match self {
                    $(PortalError::$variant(_) => $status,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(PortalError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl PortalError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        PortalError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_portal_errors! {
    DatabaseConfig("E001", "Database Configuration Error", StatusCode::INTERNAL_SERVER_ERROR),
    DatabaseConnection("E002", "Database Connection Error", StatusCode::INTERNAL_SERVER_ERROR),
    DatabaseOperation("E003", "Database Operation Error", StatusCode::INTERNAL_SERVER_ERROR),
    FileOperation("E004", "File Operation Error", StatusCode::INTERNAL_SERVER_ERROR),
    Validation("E005", "Validation Error", StatusCode::BAD_REQUEST),
    NotFound("E006", "Resource Not Found", StatusCode::NOT_FOUND),
    Serialization("E007", "Serialization Error", StatusCode::INTERNAL_SERVER_ERROR),
    Authentication("E008", "Authentication Error", StatusCode::UNAUTHORIZED),
    Configuration("E009", "Configuration Error", StatusCode::INTERNAL_SERVER_ERROR),
    Upstream("E010", "Identity Provider Error", StatusCode::BAD_GATEWAY),
}

impl PortalError {
    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for PortalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for PortalError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for PortalError {
    fn from(err: sea_orm::DbErr) -> Self {
        PortalError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for PortalError {
    fn from(err: std::io::Error) -> Self {
        PortalError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for PortalError {
    fn from(err: serde_json::Error) -> Self {
        PortalError::Serialization(err.to_string())
    }
}

impl From<reqwest::Error> for PortalError {
    fn from(err: reqwest::Error) -> Self {
        PortalError::Upstream(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PortalError>;
