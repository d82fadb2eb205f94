//! 请求参数解析错误处理
//!
//! 把 actix 默认的纯文本 400 换成统一的 JSON 结构。

use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::{Error, HttpRequest, HttpResponse};
use tracing::debug;

use crate::models::ApiResponse;
use crate::models::submissions::responses::INVALID_BODY_MESSAGE;

pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> Error {
    debug!("Rejected JSON payload on {}: {}", req.path(), err);

    let response = match &err {
        JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
            HttpResponse::PayloadTooLarge()
                .json(ApiResponse::error(INVALID_BODY_MESSAGE, err.to_string()))
        }
        JsonPayloadError::ContentType => HttpResponse::UnsupportedMediaType()
            .json(ApiResponse::error(INVALID_BODY_MESSAGE, err.to_string())),
        _ => HttpResponse::BadRequest()
            .json(ApiResponse::error(INVALID_BODY_MESSAGE, err.to_string())),
    };

    InternalError::from_response(err, response).into()
}
