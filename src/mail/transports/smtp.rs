//! SMTP 邮件传输（lettre）
//!
//! 使用邮箱账号认证，发件地址固定为账号地址，显示名为提交者姓名，
//! 回复地址为提交者邮箱。

use async_trait::async_trait;
use lettre::message::{Mailbox, header::ContentType};
use lettre::transport::smtp::PoolConfig;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, warn};

use crate::config::MailConfig;
use crate::declare_mailer_plugin;
use crate::errors::{PortfolioError, Result};
use crate::mail::{MailMessage, Mailer};

declare_mailer_plugin!("smtp", SmtpMailer);

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Address,
    to: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &MailConfig) -> Result<Self> {
        let smtp = &config.smtp;

        if smtp.username.trim().is_empty() || smtp.password.is_empty() {
            return Err(PortfolioError::mail_config(
                "SMTP credentials are not set (EMAIL_USER / EMAIL_PASS)",
            ));
        }
        if config.receiver.trim().is_empty() {
            return Err(PortfolioError::mail_config(
                "Mail receiver is not set (EMAIL_RECEIVER)",
            ));
        }

        let from: Address = smtp.username.trim().parse()?;
        let to: Mailbox = config.receiver.trim().parse()?;

        let builder = match smtp.tls.as_str() {
            "tls" => AsyncSmtpTransport::<Tokio1Executor>::relay(&smtp.host)?,
            "starttls" => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&smtp.host)?,
            "none" => {
                warn!("SMTP transport configured without TLS, credentials are sent in clear text");
                AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&smtp.host)
            }
            other => {
                return Err(PortfolioError::mail_config(format!(
                    "Unknown SMTP tls mode '{other}', expected tls / starttls / none"
                )));
            }
        };

        let transport = builder
            .port(smtp.port)
            .credentials(Credentials::new(
                smtp.username.trim().to_string(),
                smtp.password.clone(),
            ))
            .pool_config(PoolConfig::new().max_size(smtp.pool_size.max(1)))
            .build();

        debug!(
            "SMTP mailer initialized: {}:{} ({})",
            smtp.host, smtp.port, smtp.tls
        );

        Ok(Self { transport, from, to })
    }

    /// 组装 MIME 邮件
    fn build_message(&self, message: MailMessage) -> Result<Message> {
        let mut builder = Message::builder()
            .from(Mailbox::new(Some(message.from_name), self.from.clone()))
            .to(self.to.clone())
            .subject(message.subject)
            .header(ContentType::TEXT_HTML);

        if let Some(reply_to) = message.reply_to {
            match reply_to.parse::<Mailbox>() {
                Ok(mailbox) => builder = builder.reply_to(mailbox),
                Err(e) => warn!("Dropping unparsable Reply-To '{}': {}", reply_to, e),
            }
        }

        Ok(builder.body(message.html)?)
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, message: MailMessage) -> Result<()> {
        let email = self.build_message(message)?;
        let response = self.transport.send(email).await?;
        debug!("SMTP server accepted message: {:?}", response.code());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SmtpConfig;

    fn mail_config(tls: &str) -> MailConfig {
        MailConfig {
            transport: "smtp".to_string(),
            receiver: "owner@example.com".to_string(),
            smtp: SmtpConfig {
                host: "smtp.example.com".to_string(),
                port: 465,
                tls: tls.to_string(),
                username: "site@example.com".to_string(),
                password: "app-password".to_string(),
                pool_size: 2,
            },
        }
    }

    fn install_crypto_provider() {
        let _ = rustls::crypto::ring::default_provider().install_default();
    }

    fn message(reply_to: Option<&str>) -> MailMessage {
        MailMessage {
            from_name: "Ada".to_string(),
            reply_to: reply_to.map(str::to_string),
            subject: "New Portfolio Inquiry: General from Ada".to_string(),
            html: "<p>hello</p>".to_string(),
        }
    }

    #[test]
    fn test_missing_credentials_rejected() {
        let mut config = mail_config("tls");
        config.smtp.password.clear();
        let err = SmtpMailer::new(&config).err().expect("should fail");
        assert_eq!(err.code(), "E004");
    }

    #[test]
    fn test_missing_receiver_rejected() {
        let mut config = mail_config("tls");
        config.receiver = "  ".to_string();
        assert!(SmtpMailer::new(&config).is_err());
    }

    #[test]
    fn test_unknown_tls_mode_rejected() {
        install_crypto_provider();
        assert!(SmtpMailer::new(&mail_config("ssl3")).is_err());
    }

    #[tokio::test]
    async fn test_message_headers() {
        install_crypto_provider();
        let mailer = SmtpMailer::new(&mail_config("starttls")).unwrap();
        let email = mailer.build_message(message(Some("ada@example.com"))).unwrap();
        let raw = String::from_utf8(email.formatted()).unwrap();

        let from_line = raw.lines().find(|l| l.starts_with("From:")).unwrap();
        assert!(from_line.contains("Ada"));
        assert!(from_line.contains("<site@example.com>"));
        assert!(raw.contains("To: owner@example.com"));
        assert!(raw.contains("Reply-To: ada@example.com"));
        assert!(raw.contains("Subject: New Portfolio Inquiry: General from Ada"));
        assert!(raw.contains("text/html"));
    }

    #[tokio::test]
    async fn test_message_without_reply_to() {
        install_crypto_provider();
        let mailer = SmtpMailer::new(&mail_config("tls")).unwrap();
        let email = mailer.build_message(message(None)).unwrap();
        let raw = String::from_utf8(email.formatted()).unwrap();
        assert!(!raw.contains("Reply-To"));
    }
}
