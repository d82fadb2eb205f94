pub mod create;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::mail::Mailer;
use crate::models::submissions::requests::CreateSubmissionRequest;
use crate::storage::Storage;

pub struct SubmissionService {
    storage: Option<Arc<dyn Storage>>,
    mailer: Option<Arc<dyn Mailer>>,
}

impl SubmissionService {
    pub fn new_lazy() -> Self {
        Self {
            storage: None,
            mailer: None,
        }
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

    pub(crate) fn get_mailer(&self, request: &HttpRequest) -> Arc<dyn Mailer> {
        if let Some(mailer) = &self.mailer {
            mailer.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Mailer>>>()
                .expect("Mailer not found in app data")
                .get_ref()
                .clone()
        }
    }

    /// 提交联系表单：先写库，再发通知邮件
    pub async fn create_submission(
        &self,
        request: &HttpRequest,
        req: CreateSubmissionRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_submission(self, request, req).await
    }

    /// 列出全部提交（最新在前）
    pub async fn list_submissions(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_submissions(self, request).await
    }
}
