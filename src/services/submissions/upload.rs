//! multipart 上传解析

use actix_multipart::Multipart;
use actix_web::HttpResponse;
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;

use crate::config::AppConfig;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::sanitize_file_name;

/// 上传的单个文件
pub(crate) struct UploadedFile {
    pub file_name: String,
    pub data: Vec<u8>,
}

/// 读取名为 `file` 的字段，失败时返回可直接发送的错误响应
pub(crate) async fn read_file_field(
    mut payload: Multipart,
) -> actix_web::Result<Result<UploadedFile, HttpResponse>> {
    let max_size = AppConfig::get().upload.max_size;
    let mut uploaded: Option<UploadedFile> = None;

    while let Some(mut field) = payload.try_next().await? {
        let content_disposition = field.content_disposition();
        let name = content_disposition
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();

        if name != "file" {
            // 忽略其他字段，但需要读完
            while field.next().await.is_some() {}
            continue;
        }

        if uploaded.is_some() {
            return Ok(Err(HttpResponse::BadRequest().json(
                ApiResponse::error_empty(
                    ErrorCode::MultifileUploadNotAllowed,
                    "Only one file can be uploaded at a time",
                ),
            )));
        }

        let original_name = content_disposition
            .and_then(|cd| cd.get_filename())
            .map(|s| s.to_string())
            .unwrap_or_default();
        let file_name = match sanitize_file_name(&original_name) {
            Ok(name) => name,
            Err(msg) => {
                return Ok(Err(HttpResponse::BadRequest()
                    .json(ApiResponse::error_empty(ErrorCode::FileNameInvalid, msg))));
            }
        };

        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk?;
            // 校验大小
            if data.len() + chunk.len() > max_size {
                return Ok(Err(HttpResponse::PayloadTooLarge().json(
                    ApiResponse::error_empty(
                        ErrorCode::FileSizeExceeded,
                        "File size exceeds the limit",
                    ),
                )));
            }
            data.extend_from_slice(&chunk);
        }

        uploaded = Some(UploadedFile { file_name, data });
    }

    match uploaded {
        Some(file) => Ok(Ok(file)),
        None => Ok(Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::FileNotFound,
            "No file found in upload payload",
        )))),
    }
}
