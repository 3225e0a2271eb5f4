use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::submissions::requests::GradeQuery;
use crate::services::SubmissionService;
use crate::utils::SafeIDI64;

// 懒加载的全局 SubmissionService 实例
static SUBMISSION_SERVICE: Lazy<SubmissionService> = Lazy::new(SubmissionService::new_lazy);

// HTTP处理程序
pub async fn submit(
    req: HttpRequest,
    payload: actix_multipart::Multipart,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE.create_submission(&req, payload).await
}

pub async fn update_submission(
    req: HttpRequest,
    id: SafeIDI64,
    payload: actix_multipart::Multipart,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE.update_submission(&req, id.0, payload).await
}

pub async fn delete_submission(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE.delete_submission(&req, id.0).await
}

pub async fn grade_submission(
    req: HttpRequest,
    id: SafeIDI64,
    query: web::Query<GradeQuery>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .grade_submission(&req, id.0, query.into_inner().grading)
        .await
}

pub async fn list_my_submissions(req: HttpRequest) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE.list_my_submissions(&req).await
}

pub async fn list_user_submissions(
    req: HttpRequest,
    email: web::Path<String>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .list_user_submissions(&req, email.into_inner())
        .await
}

pub async fn get_submission(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE.get_submission(&req, id.0).await
}

pub async fn download_submission(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE.download_submission(&req, id.0).await
}

// 配置路由
pub fn configure_submission_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/submissions")
            .wrap(middlewares::RequireJWT::strict())
            .route("/submit", web::post().to(submit))
            .route("/update/{id}", web::put().to(update_submission))
            .route("/delete/{id}", web::delete().to(delete_submission))
            .route("/grading/{id}", web::put().to(grade_submission))
            .route("/my", web::get().to(list_my_submissions))
            .route("/user/{email}", web::get().to(list_user_submissions))
            .route("/file/{id}", web::get().to(download_submission))
            .route("/{id}", web::get().to(get_submission)),
    );
}
