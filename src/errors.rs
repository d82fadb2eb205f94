//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_portfolio_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum PortfolioError {
            $($variant(String),)*
        }

        impl PortfolioError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(PortfolioError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(PortfolioError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(PortfolioError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl PortfolioError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        PortfolioError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_portfolio_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    MailConfig("E004", "Mail Configuration Error"),
    MailTransport("E005", "Mail Transport Error"),
    MailPluginNotFound("E006", "Mail Plugin Not Found"),
    Validation("E007", "Validation Error"),
    Serialization("E008", "Serialization Error"),
    FileOperation("E009", "File Operation Error"),
}

impl PortfolioError {
    /// 是否为客户端输入错误（对应 HTTP 400）
    pub fn is_client_error(&self) -> bool {
        matches!(self, PortfolioError::Validation(_))
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for PortfolioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for PortfolioError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for PortfolioError {
    fn from(err: sea_orm::DbErr) -> Self {
        PortfolioError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for PortfolioError {
    fn from(err: std::io::Error) -> Self {
        PortfolioError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for PortfolioError {
    fn from(err: serde_json::Error) -> Self {
        PortfolioError::Serialization(err.to_string())
    }
}

impl From<lettre::transport::smtp::Error> for PortfolioError {
    fn from(err: lettre::transport::smtp::Error) -> Self {
        PortfolioError::MailTransport(err.to_string())
    }
}

impl From<lettre::error::Error> for PortfolioError {
    fn from(err: lettre::error::Error) -> Self {
        PortfolioError::MailTransport(err.to_string())
    }
}

impl From<lettre::address::AddressError> for PortfolioError {
    fn from(err: lettre::address::AddressError) -> Self {
        PortfolioError::MailConfig(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PortfolioError>;
