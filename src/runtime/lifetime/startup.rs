use crate::config::AppConfig;
use crate::errors::Result;
use crate::mail::{Mailer, create_mailer};
use crate::storage::Storage;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub mailer: Arc<dyn Mailer>,
}

/// 准备服务器启动的上下文
/// 包括存储（含迁移）和邮件发送器
///
/// 数据库或邮件配置不可用时直接返回错误，服务不启动
pub async fn prepare_server_startup() -> Result<StartupContext> {
    // 重复安装时返回 Err，仅说明已有进程级 provider
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        debug!("rustls crypto provider already installed");
    }

    if cfg!(debug_assertions) {
        crate::mail::transports::register_builtin_mailers();
        crate::mail::register::debug_mailer_registry();
        debug!("Debug mode: Mailer registry is enabled");
    }

    let storage = crate::storage::create_storage().await?;
    warn!("Storage backend initialized and migrations completed");

    let config = AppConfig::get();
    let mailer = create_mailer(&config.mail).await?;
    warn!(
        "Mail transport '{}' initialized, notifications go to {}",
        config.mail.transport, config.mail.receiver
    );

    Ok(StartupContext { storage, mailer })
}
