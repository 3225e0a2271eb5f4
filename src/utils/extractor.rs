//! 路径参数提取器
//!
//! 解析失败时直接返回统一格式的 400 响应，而不是 actix 默认的纯文本错误。

use actix_web::{
    FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError,
};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate_user_id;

fn bad_path_param(message: String) -> actix_web::Error {
    InternalError::from_response(
        message.clone(),
        HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty(
            ErrorCode::ParameterInvalid,
            message,
        )),
    )
    .into()
}

/// 路径中的正整数 ID（`{id}`）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SafeIDI64(pub i64);

impl FromRequest for SafeIDI64 {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let raw = req.match_info().get("id").unwrap_or_default();
        let result = match raw.parse::<i64>() {
            Ok(id) if id > 0 => Ok(SafeIDI64(id)),
            _ => Err(bad_path_param(format!("Invalid id: {raw}"))),
        };
        ready(result)
    }
}

/// 路径中的 Keycloak 用户 ID（`{user_id}`），只允许 UUID 字符集
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafeUserId(pub String);

impl FromRequest for SafeUserId {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let raw = req.match_info().get("user_id").unwrap_or_default();
        let result = match validate_user_id(raw) {
            Ok(()) => Ok(SafeUserId(raw.to_string())),
            Err(_) => Err(bad_path_param(format!("Invalid user id: {raw}"))),
        };
        ready(result)
    }
}
