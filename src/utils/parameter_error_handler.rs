use actix_web::{
    HttpRequest, HttpResponse,
    error::{InternalError, JsonPayloadError, QueryPayloadError},
};

use crate::models::{ApiResponse, ErrorCode};

// 查询参数解析失败（例如 grading 不是有效成绩）
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = format!("Invalid query parameters: {err}");
    InternalError::from_response(
        err,
        HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty(
            ErrorCode::ParameterInvalid,
            message,
        )),
    )
    .into()
}

// JSON 请求体解析失败
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = format!("Invalid JSON payload: {err}");
    InternalError::from_response(
        err,
        HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty(
            ErrorCode::BadRequest,
            message,
        )),
    )
    .into()
}
