use serde::Deserialize;

use super::entities::NewSubmission;
use crate::errors::{PortfolioError, Result};

// 提交联系表单请求
//
// 所有字段都声明为可选，缺失字段交给 validate 统一处理，
// 这样缺字段返回的是业务 400 而不是反序列化错误。
#[derive(Debug, Default, Deserialize)]
pub struct CreateSubmissionRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub about: Option<String>,
    pub prompt: Option<String>,
}

/// 必填字段：存在且不为空字符串
fn required(field: &'static str, value: Option<String>) -> Result<String> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(PortfolioError::validation(format!("{field} is required"))),
    }
}

impl CreateSubmissionRequest {
    /// 校验必填字段（name、email、prompt），about 可以缺省
    pub fn validate(self) -> Result<NewSubmission> {
        Ok(NewSubmission {
            name: required("name", self.name)?,
            email: required("email", self.email)?,
            prompt: required("prompt", self.prompt)?,
            about: self.about,
        })
    }
}
