/*!
 * 速率限制中间件
 *
 * 联系表单是公开的写接口，每次提交都会触发一封外发邮件，
 * 因此按客户端 IP 做固定窗口限流。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use actix_web::{web, App};
 * use crate::middlewares::rate_limit::RateLimit;
 *
 * App::new()
 *     .service(
 *         web::resource("/submit")
 *             .wrap(RateLimit::new(5, 60))  // 5次/分钟
 *             .route(web::post().to(create_submission))
 *     )
 * ```
 *
 * ## 限制规则
 *
 * - 使用 TCP 对端地址作为限制键
 * - 只有对端在 `trusted_proxies` 中时才读取 X-Forwarded-For / X-Real-IP
 * - 窗口按 `unix 秒 / window_secs` 对齐，窗口切换后计数归零
 * - 超过限制返回 429 Too Many Requests，Retry-After 为当前窗口剩余秒数
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    http::header::{CONTENT_TYPE, HeaderName, HeaderValue},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use moka::future::Cache;
use once_cell::sync::Lazy;
use std::net::IpAddr;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use crate::config::RateLimitConfig;
use crate::models::ApiResponse;
use crate::models::submissions::responses::RATE_LIMITED_MESSAGE;

/// 全局速率限制缓存
/// 键: 前缀:IP，值: (窗口编号, 请求计数)
static RATE_LIMIT_CACHE: Lazy<Cache<String, (u64, u32)>> = Lazy::new(|| {
    Cache::builder()
        .time_to_idle(Duration::from_secs(60 * 60))
        .max_capacity(100_000)
        .build()
});

/// 速率限制配置
#[derive(Clone)]
pub struct RateLimit {
    /// 时间窗口内允许的最大请求数
    max_requests: u32,
    /// 时间窗口（秒）
    window_secs: u64,
    /// 限制键前缀（用于区分不同端点）
    key_prefix: String,
    /// 可信反向代理，只有来自这些地址的转发头才被采纳
    trusted_proxies: Arc<Vec<IpAddr>>,
}

impl RateLimit {
    /// 创建新的速率限制器
    ///
    /// # 参数
    /// - `max_requests`: 时间窗口内允许的最大请求数
    /// - `window_secs`: 时间窗口（秒）
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window_secs: window_secs.max(1),
            key_prefix: String::new(),
            trusted_proxies: Arc::new(Vec::new()),
        }
    }

    /// 设置限制键前缀
    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.key_prefix = prefix.to_string();
        self
    }

    /// 设置可信代理
    pub fn with_trusted_proxies(mut self, proxies: Vec<IpAddr>) -> Self {
        self.trusted_proxies = Arc::new(proxies);
        self
    }

    /// 表单提交限制（来自配置）
    pub fn submit(config: &RateLimitConfig) -> Self {
        Self::new(config.submit_max_requests, config.submit_window_secs)
            .with_prefix("submit")
            .with_trusted_proxies(parse_trusted_proxies(&config.trusted_proxies))
    }
}

/// 解析配置中的代理地址，非法条目忽略
fn parse_trusted_proxies(entries: &[String]) -> Vec<IpAddr> {
    entries
        .iter()
        .filter_map(|entry| match entry.trim().parse::<IpAddr>() {
            Ok(ip) => Some(ip),
            Err(_) => {
                warn!("Ignoring invalid trusted proxy address: {}", entry);
                None
            }
        })
        .collect()
}

/// 当前窗口编号，以及距离窗口结束的秒数（至少 1）
fn window_position(window_secs: u64) -> (u64, u64) {
    let now = chrono::Utc::now().timestamp().max(0) as u64;
    (now / window_secs, window_secs - now % window_secs)
}

/// 从请求中提取客户端 IP
///
/// 默认使用 TCP 对端地址；对端是可信代理时，依次采用
/// X-Forwarded-For 的第一跳和 X-Real-IP（只接受格式合法的 IP）。
fn extract_client_ip(req: &ServiceRequest, trusted_proxies: &[IpAddr]) -> String {
    let Some(peer) = req.peer_addr().map(|addr| addr.ip()) else {
        return "unknown".to_string();
    };

    if !trusted_proxies.contains(&peer) {
        return peer.to_string();
    }

    if let Some(forwarded) = req.headers().get("X-Forwarded-For")
        && let Ok(value) = forwarded.to_str()
        && let Some(ip) = value.split(',').next()
        && let Ok(ip) = ip.trim().parse::<IpAddr>()
    {
        return ip.to_string();
    }

    if let Some(real_ip) = req.headers().get("X-Real-IP")
        && let Ok(value) = real_ip.to_str()
        && let Ok(ip) = value.trim().parse::<IpAddr>()
    {
        return ip.to_string();
    }

    peer.to_string()
}

/// 创建速率限制错误响应
fn create_rate_limit_response(retry_after: u64) -> HttpResponse {
    HttpResponse::build(StatusCode::TOO_MANY_REQUESTS)
        .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
        .insert_header(("Retry-After", retry_after.to_string()))
        .insert_header(("X-RateLimit-Remaining", "0"))
        .json(ApiResponse::success(RATE_LIMITED_MESSAGE))
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            max_requests: self.max_requests,
            window_secs: self.window_secs,
            key_prefix: self.key_prefix.clone(),
            trusted_proxies: self.trusted_proxies.clone(),
        }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    max_requests: u32,
    window_secs: u64,
    key_prefix: String,
    trusted_proxies: Arc<Vec<IpAddr>>,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let max_requests = self.max_requests;
        let window_secs = self.window_secs;
        let key_prefix = self.key_prefix.clone();
        let trusted_proxies = self.trusted_proxies.clone();

        Box::pin(async move {
            let identifier = format!("ip:{}", extract_client_ip(&req, &trusted_proxies));
            let cache_key = if key_prefix.is_empty() {
                identifier
            } else {
                format!("{}:{}", key_prefix, identifier)
            };

            // 获取当前窗口计数，窗口切换后归零
            let (window, retry_after) = window_position(window_secs);
            let current_count = match RATE_LIMIT_CACHE.get(&cache_key).await {
                Some((w, count)) if w == window => count,
                _ => 0,
            };

            if current_count >= max_requests {
                warn!(
                    "Rate limit exceeded for key: {} (count: {}/{})",
                    cache_key, current_count, max_requests
                );
                return Ok(req
                    .into_response(create_rate_limit_response(retry_after).map_into_right_body()));
            }

            RATE_LIMIT_CACHE
                .insert(cache_key, (window, current_count + 1))
                .await;

            let remaining = max_requests.saturating_sub(current_count + 1);

            let mut res = srv.call(req).await?;
            let headers = res.headers_mut();
            headers.insert(
                HeaderName::from_static("x-ratelimit-limit"),
                HeaderValue::from(max_requests),
            );
            headers.insert(
                HeaderName::from_static("x-ratelimit-remaining"),
                HeaderValue::from(remaining),
            );
            Ok(res.map_into_left_body())
        })
    }
}
