use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::SubmissionService;
use crate::models::ApiResponse;

pub async fn list_submissions(
    service: &SubmissionService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_submissions().await {
        Ok(submissions) => Ok(HttpResponse::Ok().json(submissions)),
        Err(e) => {
            error!("Failed to list submissions: {}", e);
            Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(e.message())))
        }
    }
}
