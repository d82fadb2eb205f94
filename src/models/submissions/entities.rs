use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// 联系表单提交记录
///
/// `id` 与 `submission_date` 由服务端在创建时分配，之后不再修改。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub about: Option<String>,
    pub prompt: String,
    pub submission_date: NaiveDateTime,
}

/// 通过校验、待写入的提交
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubmission {
    pub name: String,
    pub email: String,
    pub about: Option<String>,
    pub prompt: String,
}
