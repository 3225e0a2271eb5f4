pub mod classify;
pub mod delete;
pub mod list;

pub use classify::{StudentClassifier, is_student};

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::identity::IdentityProvider;

pub struct StudentService {
    provider: Option<Arc<dyn IdentityProvider>>,
}

impl StudentService {
    pub fn new_lazy() -> Self {
        Self { provider: None }
    }

    pub(crate) fn get_provider(&self, request: &HttpRequest) -> Arc<dyn IdentityProvider> {
        if let Some(provider) = &self.provider {
            provider.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn IdentityProvider>>>()
                .expect("IdentityProvider not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub(crate) fn get_classifier(&self, request: &HttpRequest) -> StudentClassifier {
        StudentClassifier::from_config(self.get_provider(request), &AppConfig::get().keycloak)
    }

    // 列出学生账号
    pub async fn list_students(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_students(self, request).await
    }

    // 删除账号
    pub async fn delete_account(
        &self,
        request: &HttpRequest,
        user_id: String,
    ) -> ActixResult<HttpResponse> {
        delete::delete_account(self, request, user_id).await
    }
}
