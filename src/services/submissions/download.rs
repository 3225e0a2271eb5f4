use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::header};

use super::SubmissionService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn download_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let submission = match storage.get_submission_by_id(submission_id).await {
        Ok(submission) => submission,
        Err(e) => {
            return Ok(ApiResponse::from_portal_error(&e, ErrorCode::FileNotFound));
        }
    };

    // 使用上传时的文件名
    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, "application/octet-stream"))
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", submission.file_name),
        ))
        .body(submission.file_data))
}
