use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::config::AppConfig;
use crate::middlewares::RateLimit;
use crate::models::submissions::requests::CreateSubmissionRequest;
use crate::services::SubmissionService;

// 懒加载的全局 SubmissionService 实例
static SUBMISSION_SERVICE: Lazy<SubmissionService> = Lazy::new(SubmissionService::new_lazy);

// 提交联系表单
pub async fn create_submission(
    req: HttpRequest,
    body: web::Json<CreateSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .create_submission(&req, body.into_inner())
        .await
}

// 列出全部提交（供 submissions.html 使用）
pub async fn list_submissions(req: HttpRequest) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE.list_submissions(&req).await
}

// 配置路由
pub fn configure_submissions_routes(cfg: &mut web::ServiceConfig) {
    let config = AppConfig::get();
    register_submissions_routes(cfg, RateLimit::submit(&config.rate_limit));
}

/// 注册提交相关路由，`submit_limit` 只作用于 POST /submit
pub fn register_submissions_routes(cfg: &mut web::ServiceConfig, submit_limit: RateLimit) {
    cfg.service(
        web::resource("/submit")
            .wrap(submit_limit)
            .route(web::post().to(create_submission)),
    )
    .service(web::resource("/submissions").route(web::get().to(list_submissions)));
}
