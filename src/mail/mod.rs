//! 邮件通知
//!
//! - `Mailer`: 邮件传输抽象，服务层只依赖这个 trait
//! - `register`: 按名称注册/查找传输插件
//! - `transports`: 内置传输实现（smtp / log）

pub mod register;
pub mod transports;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::config::MailConfig;
use crate::errors::{PortfolioError, Result};
use crate::models::submissions::entities::Submission;
use crate::utils::html::escape_html;
use crate::utils::validate::validate_email;

/// 一封待发送的通知邮件
///
/// 发件地址和收件人由传输层根据配置决定，这里只携带与提交相关的内容。
#[derive(Debug, Clone, PartialEq)]
pub struct MailMessage {
    /// 发件人显示名（提交者姓名）
    pub from_name: String,
    /// 回复地址（提交者邮箱），格式非法时为 None
    pub reply_to: Option<String>,
    pub subject: String,
    pub html: String,
}

impl MailMessage {
    /// 根据一条提交生成站长通知邮件
    pub fn for_submission(submission: &Submission) -> Self {
        let about = submission.about.as_deref().filter(|a| !a.is_empty());

        let reply_to = match validate_email(&submission.email) {
            Ok(()) => Some(submission.email.clone()),
            Err(reason) => {
                warn!(
                    "Submission {} has unusable reply address '{}': {}",
                    submission.id, submission.email, reason
                );
                None
            }
        };

        let subject = format!(
            "New Portfolio Inquiry: {} from {}",
            about.unwrap_or("General"),
            submission.name
        );

        let details = escape_html(&submission.prompt).replace('\n', "<br>");
        let html = format!(
            "<h2>New Contact Form Submission</h2>\n\
             <p><strong>Name:</strong> {}</p>\n\
             <p><strong>Email:</strong> {}</p>\n\
             <p><strong>Subject (About):</strong> {}</p>\n\
             <h3>Details:</h3>\n\
             <p>{}</p>\n",
            escape_html(&submission.name),
            escape_html(&submission.email),
            escape_html(about.unwrap_or("Not specified")),
            details
        );

        Self {
            from_name: submission.name.clone(),
            reply_to,
            subject,
            html,
        }
    }
}

#[async_trait]
pub trait Mailer: Send + Sync {
    /// 发送邮件，失败时不重试
    async fn send(&self, message: MailMessage) -> Result<()>;
}

/// 根据配置创建邮件传输实例
pub async fn create_mailer(config: &MailConfig) -> Result<Arc<dyn Mailer>> {
    transports::register_builtin_mailers();

    let name = config.transport.as_str();
    let constructor = register::get_mailer_plugin(name).ok_or_else(|| {
        PortfolioError::mail_plugin_not_found(format!("Mail transport '{name}' not registered"))
    })?;

    let mailer = constructor(config.clone()).await?;
    Ok(Arc::from(mailer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn submission(about: Option<&str>, email: &str, prompt: &str) -> Submission {
        Submission {
            id: 7,
            name: "Ada <Lovelace>".to_string(),
            email: email.to_string(),
            about: about.map(str::to_string),
            prompt: prompt.to_string(),
            submission_date: NaiveDate::from_ymd_opt(2025, 1, 2)
                .unwrap()
                .and_hms_opt(3, 4, 5)
                .unwrap(),
        }
    }

    #[test]
    fn test_subject_uses_about() {
        let msg = MailMessage::for_submission(&submission(Some("Logo"), "ada@example.com", "x"));
        assert_eq!(msg.subject, "New Portfolio Inquiry: Logo from Ada <Lovelace>");
        assert_eq!(msg.from_name, "Ada <Lovelace>");
        assert_eq!(msg.reply_to.as_deref(), Some("ada@example.com"));
    }

    #[test]
    fn test_subject_defaults_to_general() {
        let msg = MailMessage::for_submission(&submission(None, "ada@example.com", "x"));
        assert_eq!(msg.subject, "New Portfolio Inquiry: General from Ada <Lovelace>");
        assert!(msg.html.contains("Not specified"));

        let msg = MailMessage::for_submission(&submission(Some(""), "ada@example.com", "x"));
        assert!(msg.subject.starts_with("New Portfolio Inquiry: General"));
    }

    #[test]
    fn test_body_escapes_and_breaks_lines() {
        let msg = MailMessage::for_submission(&submission(
            None,
            "ada@example.com",
            "line one\n<script>alert(1)</script>",
        ));
        assert!(msg.html.contains("line one<br>&lt;script&gt;"));
        assert!(msg.html.contains("Ada &lt;Lovelace&gt;"));
        assert!(!msg.html.contains("<script>"));
    }

    #[test]
    fn test_invalid_reply_address_is_dropped() {
        let msg = MailMessage::for_submission(&submission(None, "not-an-address", "x"));
        assert!(msg.reply_to.is_none());
        assert!(msg.html.contains("not-an-address"));
    }

    #[tokio::test]
    async fn test_unknown_transport_is_rejected() {
        let config = MailConfig {
            transport: "carrier-pigeon".to_string(),
            receiver: "owner@example.com".to_string(),
            smtp: crate::config::SmtpConfig {
                host: "localhost".to_string(),
                port: 25,
                tls: "none".to_string(),
                username: String::new(),
                password: String::new(),
                pool_size: 1,
            },
        };
        let err = create_mailer(&config).await.err().expect("should fail");
        assert_eq!(err.code(), "E006");
    }
}
