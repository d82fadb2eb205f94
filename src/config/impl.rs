use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use std::sync::OnceLock;

use super::AppConfig;

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

impl AppConfig {
    /// 内置默认值，保证没有配置文件时也能启动
    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("app.environment", "development")?
            .set_default("app.log_level", "info")?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5500_i64)?
            .set_default("server.unix_socket_path", "")?
            .set_default("server.workers", 0_i64)?
            .set_default("server.max_workers", 8_i64)?
            .set_default("server.timeouts.client_request", 5000_i64)?
            .set_default("server.timeouts.client_disconnect", 1000_i64)?
            .set_default("server.timeouts.keep_alive", 30_i64)?
            .set_default("server.limits.max_payload_size", 262_144_i64)?
            .set_default("database.url", "portfolio.db")?
            .set_default("database.pool_size", 5_i64)?
            .set_default("database.timeout", 10_i64)?
            .set_default("mail.transport", "smtp")?
            .set_default("mail.receiver", "")?
            .set_default("mail.smtp.host", "smtp.gmail.com")?
            .set_default("mail.smtp.port", 465_i64)?
            .set_default("mail.smtp.tls", "tls")?
            .set_default("mail.smtp.username", "")?
            .set_default("mail.smtp.password", "")?
            .set_default("mail.smtp.pool_size", 4_i64)?
            .set_default("cors.allowed_origins", vec!["*"])?
            .set_default("cors.max_age", 3600_i64)?
            .set_default("rate_limit.submit_max_requests", 5_i64)?
            .set_default("rate_limit.submit_window_secs", 60_i64)?
            .set_default("rate_limit.trusted_proxies", Vec::<String>::new())?
            .set_default("frontend.custom_dir", "")
    }

    /// 加载配置
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Self::defaults()?
            // 首先加载默认配置文件
            .add_source(File::with_name("config").required(false))
            // 然后根据环境加载特定配置文件
            .add_source(
                File::with_name(&format!(
                    "config.{}",
                    std::env::var("APP_ENV").unwrap_or_else(|_| "development".into())
                ))
                .required(false),
            )
            // 最后加载环境变量覆盖
            .add_source(
                Environment::with_prefix("PORTFOLIO")
                    .separator("__")
                    .try_parsing(true),
            );

        // 兼容常用环境变量
        builder = builder
            .set_override_option("app.environment", std::env::var("APP_ENV").ok())?
            .set_override_option("app.log_level", std::env::var("RUST_LOG").ok())?
            .set_override_option("server.host", std::env::var("SERVER_HOST").ok())?
            .set_override_option("server.port", std::env::var("SERVER_PORT").ok())?
            .set_override_option("server.unix_socket_path", std::env::var("UNIX_SOCKET").ok())?
            .set_override_option("server.workers", std::env::var("CPU_COUNT").ok())?
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .set_override_option("mail.transport", std::env::var("MAIL_TRANSPORT").ok())?
            .set_override_option("mail.receiver", std::env::var("EMAIL_RECEIVER").ok())?
            .set_override_option("mail.smtp.host", std::env::var("SMTP_HOST").ok())?
            .set_override_option("mail.smtp.port", std::env::var("SMTP_PORT").ok())?
            .set_override_option("mail.smtp.username", std::env::var("EMAIL_USER").ok())?
            .set_override_option("mail.smtp.password", std::env::var("EMAIL_PASS").ok())?;

        let config = builder.build()?;
        let mut app_config: AppConfig = config.try_deserialize()?;

        // 处理工作线程数
        if app_config.server.workers == 0 {
            app_config.server.workers = num_cpus::get().min(app_config.server.max_workers);
        }

        Ok(app_config)
    }

    /// 获取全局配置实例
    pub fn get() -> &'static AppConfig {
        APP_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                eprintln!("Failed to load configuration: {e}");
                std::process::exit(1);
            })
        })
    }

    /// 初始化配置 (在应用启动时调用)
    pub fn init() -> Result<(), ConfigError> {
        let config = Self::load()?;
        APP_CONFIG
            .set(config)
            .map_err(|_| ConfigError::Message("Configuration already initialized".to_string()))?;
        Ok(())
    }

    /// 检查是否为开发环境
    pub fn is_development(&self) -> bool {
        self.app.environment == "development"
    }

    /// 获取服务器绑定地址
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// 获取 Unix 套接字路径 (如果配置了)
    #[cfg(unix)]
    pub fn unix_socket_path(&self) -> Option<&str> {
        if self.server.unix_socket_path.is_empty() {
            None
        } else {
            Some(&self.server.unix_socket_path)
        }
    }

    /// 是否允许任意来源跨域
    pub fn allows_any_origin(&self) -> bool {
        self.cors.allowed_origins.iter().any(|o| o == "*")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_config() -> AppConfig {
        AppConfig::defaults()
            .and_then(|b| b.build())
            .and_then(|c| c.try_deserialize())
            .expect("defaults should deserialize")
    }

    #[test]
    fn test_defaults_deserialize() {
        let config = default_config();
        assert_eq!(config.server.port, 5500);
        assert_eq!(config.mail.smtp.host, "smtp.gmail.com");
        assert_eq!(config.mail.transport, "smtp");
        assert_eq!(config.rate_limit.submit_max_requests, 5);
        assert!(config.rate_limit.trusted_proxies.is_empty());
        assert!(config.is_development());
    }

    #[test]
    fn test_bind_address_and_cors() {
        let mut config = default_config();
        assert_eq!(config.server_bind_address(), "0.0.0.0:5500");
        assert!(config.allows_any_origin());

        config.cors.allowed_origins = vec!["https://example.com".to_string()];
        assert!(!config.allows_any_origin());
    }

    #[test]
    fn test_password_not_serialized() {
        let mut config = default_config();
        config.mail.smtp.password = "app-password".to_string();
        let json = serde_json::to_string(&config).expect("serialize");
        assert!(!json.contains("app-password"));
    }

    #[cfg(unix)]
    #[test]
    fn test_unix_socket_path_empty() {
        let config = default_config();
        assert!(config.unix_socket_path().is_none());
    }
}
