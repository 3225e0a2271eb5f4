use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SubmissionService;
use crate::models::submissions::entities::Grade;
use crate::models::{ApiResponse, ErrorCode, submissions::responses::SubmissionResponse};

pub async fn grade_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
    grade: Grade,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.set_submission_grade(submission_id, grade).await {
        Ok(submission) => {
            info!("Submission {} graded {}", submission_id, grade);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                SubmissionResponse::from(submission),
                "Grade updated successfully",
            )))
        }
        Err(e) => Ok(ApiResponse::from_portal_error(
            &e,
            ErrorCode::GradeUpdateFailed,
        )),
    }
}
