//! 数据模型定义
//!
//! - `entities`: 业务实体
//! - `requests`: 请求参数
//! - `responses`: 响应结构

pub mod accounts;
pub mod auth;
pub mod common;
pub mod submissions;

pub use common::response::ApiResponse;

use serde::{Deserialize, Serialize};

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 业务错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    Unauthorized = 1001,
    NotFound = 1004,
    InternalServerError = 1005,
    ParameterInvalid = 1006,

    // 认证错误
    AuthFailed = 2000,
    LoginStateInvalid = 2001,

    // 文件错误
    FileNotFound = 3000,
    FileSizeExceeded = 3002,
    MultifileUploadNotAllowed = 3003,
    FileNameInvalid = 3004,

    // 提交错误
    SubmissionNotFound = 4000,
    SubmissionCreateFailed = 4001,
    SubmissionUpdateFailed = 4002,
    SubmissionDeleteFailed = 4003,
    GradeUpdateFailed = 4101,
    UserEmailInvalid = 4200,

    // 身份提供方错误
    IdentityClientNotFound = 5001,
    StudentListFailed = 5002,
    UserNotFound = 5003,
    UserDeleteFailed = 5004,
}
