use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SubmissionService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn delete_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_submission(submission_id).await {
        Ok(()) => {
            info!("Submission {} deleted", submission_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Submission deleted successfully",
            )))
        }
        Err(e) => Ok(ApiResponse::from_portal_error(
            &e,
            ErrorCode::SubmissionDeleteFailed,
        )),
    }
}
