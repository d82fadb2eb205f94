use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info, warn};

use super::SubmissionService;
use crate::mail::MailMessage;
use crate::models::ApiResponse;
use crate::models::submissions::requests::CreateSubmissionRequest;
use crate::models::submissions::responses::{
    MISSING_FIELDS_MESSAGE, SUBMIT_FAILED_MESSAGE, SUBMIT_SUCCESS_MESSAGE,
};

pub async fn create_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    req: CreateSubmissionRequest,
) -> ActixResult<HttpResponse> {
    // 校验必填字段
    let new_submission = match req.validate() {
        Ok(valid) => valid,
        Err(e) => {
            warn!("Rejected submission: {}", e.message());
            return Ok(
                HttpResponse::BadRequest().json(ApiResponse::success(MISSING_FIELDS_MESSAGE))
            );
        }
    };

    let storage = service.get_storage(request);
    let mailer = service.get_mailer(request);

    // 1. 写入数据库，失败则不发邮件
    let submission = match storage.create_submission(new_submission).await {
        Ok(submission) => submission,
        Err(e) => {
            error!("Submission error: {}", e);
            return Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::error(SUBMIT_FAILED_MESSAGE, e.message())));
        }
    };
    info!("Saved submission ID: {}", submission.id);

    // 2. 发送通知邮件；失败时记录已写入，不回滚
    let message = MailMessage::for_submission(&submission);
    if let Err(e) = mailer.send(message).await {
        error!(
            "Submission error: {} (submission {} was persisted)",
            e, submission.id
        );
        return Ok(HttpResponse::InternalServerError()
            .json(ApiResponse::error(SUBMIT_FAILED_MESSAGE, e.message())));
    }
    info!("Email sent successfully for submission {}", submission.id);

    Ok(HttpResponse::Ok().json(ApiResponse::success(SUBMIT_SUCCESS_MESSAGE)))
}
