//! 提交存储操作

use super::SeaOrmStorage;
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions};
use crate::errors::{PortfolioError, Result};
use crate::models::submissions::entities::{NewSubmission, Submission};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use tracing::error;

impl SeaOrmStorage {
    /// 创建提交（提交时间由服务端写入）
    pub async fn create_submission_impl(&self, req: NewSubmission) -> Result<Submission> {
        let now = chrono::Utc::now().naive_utc();

        let model = ActiveModel {
            name: Set(req.name),
            email: Set(req.email),
            about: Set(req.about),
            prompt: Set(req.prompt),
            submission_date: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| {
                error!("创建提交失败: {}", e);
                PortfolioError::database_operation(e.to_string())
            })?;

        Ok(result.into_submission())
    }

    /// 列出全部提交，最新的在前
    pub async fn list_submissions_impl(&self) -> Result<Vec<Submission>> {
        let results = Submissions::find()
            .order_by_desc(Column::SubmissionDate)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("查询提交列表失败: {}", e);
                PortfolioError::database_operation(e.to_string())
            })?;

        Ok(results.into_iter().map(|m| m.into_submission()).collect())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use super::*;
    use crate::storage::Storage;

    async fn memory_storage() -> SeaOrmStorage {
        SeaOrmStorage::connect("sqlite::memory:", 1, 5)
            .await
            .expect("in-memory sqlite should open")
    }

    fn new_submission(name: &str, about: Option<&str>) -> NewSubmission {
        NewSubmission {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            about: about.map(str::to_string),
            prompt: format!("Hello from {name}"),
        }
    }

    #[tokio::test]
    async fn test_create_submission_assigns_id_and_date() {
        let storage = memory_storage().await;
        let before = chrono::Utc::now().naive_utc();

        let saved = storage
            .create_submission(new_submission("Ada", Some("Branding")))
            .await
            .unwrap();

        assert!(saved.id > 0);
        assert_eq!(saved.name, "Ada");
        assert_eq!(saved.email, "ada@example.com");
        assert_eq!(saved.about.as_deref(), Some("Branding"));
        assert!(saved.submission_date >= before);
    }

    #[tokio::test]
    async fn test_about_may_be_null() {
        let storage = memory_storage().await;
        storage
            .create_submission(new_submission("Grace", None))
            .await
            .unwrap();

        let rows = storage.list_submissions().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].about.is_none());
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let storage = memory_storage().await;
        for name in ["First", "Second", "Third"] {
            storage
                .create_submission(new_submission(name, None))
                .await
                .unwrap();
        }

        let rows = storage.list_submissions().await.unwrap();
        assert_eq!(rows.len(), 3);
        assert!(
            rows.windows(2)
                .all(|w| w[0].submission_date >= w[1].submission_date)
        );
        assert_eq!(rows[0].name, "Third");
        assert_eq!(rows[2].name, "First");
    }

    #[tokio::test]
    async fn test_list_empty_table() {
        let storage = memory_storage().await;
        assert!(storage.list_submissions().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_driver_message_is_passed_through() {
        use sea_orm::ConnectionTrait;

        let storage = memory_storage().await;
        storage
            .db
            .execute_unprepared("DROP TABLE submissions")
            .await
            .unwrap();

        let err = storage.list_submissions().await.unwrap_err();
        assert_eq!(err.code(), "E003");
        assert!(err.message().contains("no such table"));
        assert!(!err.message().contains("查询提交列表失败"));

        let err = storage
            .create_submission(new_submission("Ada", None))
            .await
            .unwrap_err();
        assert!(err.message().contains("no such table"));
        assert!(!err.message().contains("创建提交失败"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_submissions_get_unique_ids() {
        let dir = std::env::temp_dir().join(format!(
            "portfolio-concurrent-{}-{}",
            std::process::id(),
            chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        let db_path = dir.join("submissions.db");

        let storage: Arc<dyn Storage> = Arc::new(
            SeaOrmStorage::connect(db_path.to_str().unwrap(), 4, 10)
                .await
                .expect("file sqlite should open"),
        );

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let storage = storage.clone();
                tokio::spawn(async move {
                    storage
                        .create_submission(new_submission(&format!("User{i}"), None))
                        .await
                        .map(|s| s.id)
                })
            })
            .collect();

        let mut ids = HashSet::new();
        for handle in handles {
            let id = handle.await.unwrap().unwrap();
            assert!(ids.insert(id), "duplicate id {id}");
        }
        assert_eq!(ids.len(), 16);
        assert_eq!(storage.list_submissions().await.unwrap().len(), 16);

        drop(storage);
        std::fs::remove_dir_all(&dir).ok();
    }
}
