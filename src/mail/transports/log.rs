//! 只写日志、不实际发送的邮件传输，用于本地开发

use async_trait::async_trait;
use tracing::info;

use crate::config::MailConfig;
use crate::declare_mailer_plugin;
use crate::errors::Result;
use crate::mail::{MailMessage, Mailer};

declare_mailer_plugin!("log", LogMailer);

pub struct LogMailer {
    receiver: String,
}

impl LogMailer {
    pub fn new(config: &MailConfig) -> Result<Self> {
        Ok(Self {
            receiver: config.receiver.clone(),
        })
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: MailMessage) -> Result<()> {
        info!(
            to = %self.receiver,
            from_name = %message.from_name,
            reply_to = ?message.reply_to,
            subject = %message.subject,
            "Mail transport is 'log', message not sent"
        );
        Ok(())
    }
}
