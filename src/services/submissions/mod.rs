pub mod create;
pub mod delete;
pub mod detail;
pub mod download;
pub mod grade;
pub mod list;
pub mod update;
mod upload;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::submissions::entities::Grade;
use crate::storage::Storage;

pub struct SubmissionService {
    storage: Option<Arc<dyn Storage>>,
}

impl SubmissionService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 上传新的提交
    pub async fn create_submission(
        &self,
        request: &HttpRequest,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        create::create_submission(self, request, payload).await
    }

    // 替换提交的文件
    pub async fn update_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        update::update_submission(self, request, submission_id, payload).await
    }

    // 删除提交
    pub async fn delete_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_submission(self, request, submission_id).await
    }

    // 评分
    pub async fn grade_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
        grade: Grade,
    ) -> ActixResult<HttpResponse> {
        grade::grade_submission(self, request, submission_id, grade).await
    }

    // 当前用户的提交
    pub async fn list_my_submissions(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_my_submissions(self, request).await
    }

    // 指定邮箱的提交
    pub async fn list_user_submissions(
        &self,
        request: &HttpRequest,
        email: String,
    ) -> ActixResult<HttpResponse> {
        list::list_user_submissions(self, request, email).await
    }

    // 提交详情（不含文件内容）
    pub async fn get_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_submission(self, request, submission_id).await
    }

    // 下载提交文件
    pub async fn download_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
    ) -> ActixResult<HttpResponse> {
        download::download_submission(self, request, submission_id).await
    }
}
