use std::sync::Arc;

use crate::models::submissions::entities::{NewSubmission, Submission};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 联系表单提交
    // 写入一条提交，返回带有 id 与提交时间的完整记录
    async fn create_submission(&self, submission: NewSubmission) -> Result<Submission>;
    // 列出全部提交，按提交时间倒序
    async fn list_submissions(&self) -> Result<Vec<Submission>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
