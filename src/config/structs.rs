use serde::{Deserialize, Serialize};

/// 应用配置结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub mail: MailConfig,
    pub cors: CorsConfig,
    pub rate_limit: RateLimitConfig,
    pub frontend: FrontendConfig,
}

/// 应用设置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub environment: String,
    pub log_level: String,
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub unix_socket_path: String,
    pub workers: usize,
    pub max_workers: usize,
    pub timeouts: TimeoutConfig,
    pub limits: LimitConfig,
}

/// 超时配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    pub client_request: u64,
    pub client_disconnect: u64,
    pub keep_alive: u64,
}

/// 限制配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitConfig {
    pub max_payload_size: usize,
}

/// 数据库配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,    // 数据库连接 URL（从 scheme 自动推断类型）
    pub pool_size: u32, // 连接池大小
    pub timeout: u64,   // 连接超时 (秒)
}

/// 邮件配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// 邮件传输插件名称：smtp / log
    pub transport: String,
    /// 接收通知的站长邮箱
    pub receiver: String,
    pub smtp: SmtpConfig,
}

/// SMTP 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    /// "tls"（隐式 TLS，465）或 "starttls"（587）
    pub tls: String,
    pub username: String,
    #[serde(skip_serializing, default)] // 不序列化到输出中
    pub password: String,
    pub pool_size: u32,
}

/// CORS 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub max_age: usize,
}

/// 速率限制配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    pub submit_max_requests: u32,
    pub submit_window_secs: u64,
    /// 可信反向代理地址，只有来自这些对端的转发头才用于识别客户端
    #[serde(default)]
    pub trusted_proxies: Vec<String>,
}

/// 前端资源配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrontendConfig {
    /// 覆盖嵌入资源的本地目录，留空则只使用嵌入资源
    pub custom_dir: String,
}
