pub mod log;
pub mod smtp;

use std::sync::Once;

static REGISTER_BUILTINS: Once = Once::new();

/// 注册内置邮件传输插件（只执行一次）
pub fn register_builtin_mailers() {
    REGISTER_BUILTINS.call_once(|| {
        smtp::register();
        log::register();
    });
}
