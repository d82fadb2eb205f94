use crate::config::MailConfig;
use crate::errors::Result;
use crate::mail::Mailer;
use once_cell::sync::Lazy;
use std::{
    collections::HashMap,
    future::Future,
    pin::Pin,
    sync::{Arc, RwLock},
};

pub type BoxedMailerFuture = Pin<Box<dyn Future<Output = Result<Box<dyn Mailer>>> + Send>>;
pub type MailerConstructor = Arc<dyn Fn(MailConfig) -> BoxedMailerFuture + Send + Sync>;

static MAILER_REGISTRY: Lazy<RwLock<HashMap<String, MailerConstructor>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

pub fn register_mailer_plugin<S: Into<String>>(name: S, constructor: MailerConstructor) {
    let name = name.into();
    let mut registry = MAILER_REGISTRY
        .write()
        .expect("Mailer registry lock poisoned");
    registry.insert(name, constructor);
}

pub fn get_mailer_plugin(name: &str) -> Option<MailerConstructor> {
    MAILER_REGISTRY
        .read()
        .expect("Mailer registry lock poisoned")
        .get(name)
        .cloned()
}

pub fn debug_mailer_registry() {
    let registry = MAILER_REGISTRY
        .read()
        .expect("Mailer registry lock poisoned");
    if registry.is_empty() {
        tracing::debug!("No mailer plugins registered.");
    } else {
        tracing::debug!("Registered mailer plugins:");
        for key in registry.keys() {
            tracing::debug!(" - {}", key);
        }
    }
}

/// 声明一个邮件传输插件的注册函数
///
/// 插件类型需要提供 `fn new(&MailConfig) -> Result<Self>`。
#[macro_export]
macro_rules! declare_mailer_plugin {
    ($name:expr, $ty:ty) => {
        pub fn register() {
            $crate::mail::register::register_mailer_plugin(
                $name,
                std::sync::Arc::new(|config: $crate::config::MailConfig| {
                    let future: $crate::mail::register::BoxedMailerFuture = Box::pin(async move {
                        let mailer = <$ty>::new(&config)?;
                        Ok(Box::new(mailer) as Box<dyn $crate::mail::Mailer>)
                    });
                    future
                }),
            );
        }
    };
}
