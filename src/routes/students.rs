use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::services::StudentService;
use crate::utils::SafeUserId;

// 懒加载的全局 StudentService 实例
static STUDENT_SERVICE: Lazy<StudentService> = Lazy::new(StudentService::new_lazy);

pub async fn list_students(req: HttpRequest) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.list_students(&req).await
}

pub async fn delete_account(req: HttpRequest, user_id: SafeUserId) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.delete_account(&req, user_id.0).await
}

// 配置路由
pub fn configure_student_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/students")
            .wrap(middlewares::RequireJWT::strict())
            .route(web::get().to(list_students)),
    )
    .service(
        web::resource("/user/{user_id}")
            .wrap(middlewares::RequireJWT::strict())
            .route(web::delete().to(delete_account)),
    );
}
