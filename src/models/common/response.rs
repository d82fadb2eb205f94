use serde::{Deserialize, Serialize};

// 统一的 API 消息响应结构
//
// 仅提示（成功或 4xx 拒绝）：{"message": ...}
// 失败：{"message": ..., "error": ...} 或仅 {"error": ...}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            error: Some(error.into()),
        }
    }

    pub fn error_empty(error: impl Into<String>) -> Self {
        Self {
            message: None,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_omits_error() {
        let json = serde_json::to_value(ApiResponse::success("ok")).unwrap();
        assert_eq!(json, serde_json::json!({ "message": "ok" }));
    }

    #[test]
    fn test_error_carries_both_fields() {
        let json = serde_json::to_value(ApiResponse::error("failed", "disk full")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "message": "failed", "error": "disk full" })
        );
    }

    #[test]
    fn test_error_empty_omits_message() {
        let json = serde_json::to_value(ApiResponse::error_empty("query failed")).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "query failed" }));
    }
}
