/*!
 * 速率限制中间件
 *
 * 此中间件用于限制请求频率，防止暴力破解和 DDoS 攻击。
 *
 * ```rust,ignore
 * web::resource("/login")
 *     .wrap(RateLimit::login())  // 5次/分钟
 *     .route(web::post().to(login))
 * ```
 *
 * - 已认证请求按用户 ID 计数，否则按客户端 IP
 * - 固定窗口计数，窗口从第一次请求开始
 * - 超过限制返回 429，附带 Retry-After
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    http::header::CONTENT_TYPE,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use moka::future::Cache;
use once_cell::sync::Lazy;
use std::rc::Rc;
use std::time::{Duration, Instant};
use tracing::warn;

use crate::models::{ApiResponse, ErrorCode};

/// 单个限流窗口
#[derive(Clone, Copy, Debug)]
struct RateWindow {
    count: u32,
    started: Instant,
}

/// 最长窗口，超过后条目由缓存自动淘汰
const MAX_WINDOW_SECS: u64 = 3600;

/// 全局速率限制缓存
/// 键: 前缀:用户或IP，值: 当前窗口计数
static RATE_LIMIT_CACHE: Lazy<Cache<String, RateWindow>> = Lazy::new(|| {
    Cache::builder()
        .time_to_live(Duration::from_secs(MAX_WINDOW_SECS))
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
}

impl RateLimit {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window_secs: window_secs.min(MAX_WINDOW_SECS),
            key_prefix: String::new(),
        }
    }

    /// 设置限制键前缀
    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.key_prefix = prefix.to_string();
        self
    }

    /// 登录：5次/分钟/IP
    pub fn login() -> Self {
        Self::new(5, 60).with_prefix("login")
    }

    /// 注册：3次/分钟/IP
    pub fn register() -> Self {
        Self::new(3, 60).with_prefix("register")
    }

    /// 刷新令牌：10次/分钟/IP
    pub fn refresh_token() -> Self {
        Self::new(10, 60).with_prefix("refresh")
    }

    /// 媒体上传：10次/分钟/用户
    pub fn file_upload() -> Self {
        Self::new(10, 60).with_prefix("upload")
    }

    /// LeetCode 查询会打到外部接口：20次/分钟/用户
    pub fn leetcode() -> Self {
        Self::new(20, 60).with_prefix("leetcode")
    }

    /// 测评提交：30次/分钟/用户
    pub fn assessment_submit() -> Self {
        Self::new(30, 60).with_prefix("assessment")
    }
}

/// 计入一次请求；窗口过期则重新开始计数
fn bump(previous: Option<RateWindow>, now: Instant, window: Duration) -> RateWindow {
    match previous {
        Some(w) if now.duration_since(w.started) < window => RateWindow {
            count: w.count.saturating_add(1),
            started: w.started,
        },
        _ => RateWindow {
            count: 1,
            started: now,
        },
    }
}

/// 客户端 IP：连接信息优先，其次 X-Forwarded-For 第一跳，再次 X-Real-IP
///
/// 转发头可被伪造，直接暴露在公网时只应信任连接地址。
fn extract_client_ip(req: &ServiceRequest) -> String {
    let connection_ip = req
        .connection_info()
        .realip_remote_addr()
        .map(|s| s.to_string());

    if let Some(ref ip) = connection_ip
        && is_valid_ip(ip)
    {
        return ip.clone();
    }

    let forwarded = req
        .headers()
        .get("X-Forwarded-For")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next());
    let real_ip = req.headers().get("X-Real-IP").and_then(|v| v.to_str().ok());

    forwarded
        .into_iter()
        .chain(real_ip)
        .map(str::trim)
        .find(|ip| is_valid_ip(ip))
        .map(str::to_string)
        .or(connection_ip)
        .unwrap_or_else(|| "unknown".to_string())
}

/// 验证 IP 地址格式是否有效
fn is_valid_ip(ip: &str) -> bool {
    use std::net::IpAddr;
    ip.parse::<IpAddr>().is_ok()
}

/// 从请求中提取用户 ID（如果已认证）
fn extract_user_id(req: &ServiceRequest) -> Option<i64> {
    use crate::models::users::entities::User;
    req.extensions().get::<User>().map(|user| user.id)
}

/// 创建速率限制错误响应
fn create_rate_limit_response(retry_after: u64) -> HttpResponse {
    HttpResponse::build(StatusCode::TOO_MANY_REQUESTS)
        .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
        .insert_header(("Retry-After", retry_after.to_string()))
        .insert_header(("X-RateLimit-Remaining", "0"))
        .json(ApiResponse::<()>::error_empty(
            ErrorCode::RateLimitExceeded,
            "请求过于频繁，请稍后再试",
        ))
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
        }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    max_requests: u32,
    window_secs: u64,
    key_prefix: String,
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

        Box::pin(async move {
            // 构建限制键
            let identifier = extract_user_id(&req)
                .map(|id| format!("user:{}", id))
                .unwrap_or_else(|| format!("ip:{}", extract_client_ip(&req)));

            let cache_key = if key_prefix.is_empty() {
                identifier
            } else {
                format!("{}:{}", key_prefix, identifier)
            };

            // 原子地累加计数
            let window = Duration::from_secs(window_secs);
            let now = Instant::now();
            let current = RATE_LIMIT_CACHE
                .entry(cache_key.clone())
                .and_upsert_with(|entry| {
                    let previous = entry.map(|e| e.into_value());
                    std::future::ready(bump(previous, now, window))
                })
                .await
                .into_value();

            if current.count > max_requests {
                let retry_after = window
                    .saturating_sub(now.duration_since(current.started))
                    .as_secs()
                    .max(1);
                warn!(
                    "Rate limit exceeded for key: {} (count: {}/{})",
                    cache_key, current.count, max_requests
                );
                return Ok(req
                    .into_response(create_rate_limit_response(retry_after).map_into_right_body()));
            }

            req.extensions_mut().insert(RateLimitInfo {
                remaining: max_requests - current.count,
                limit: max_requests,
                reset: window_secs,
            });

            // 继续处理请求
            let res = srv.call(req).await?.map_into_left_body();
            Ok(res)
        })
    }
}

/// 速率限制信息（可在响应中添加）
#[derive(Clone)]
pub struct RateLimitInfo {
    pub remaining: u32,
    pub limit: u32,
    pub reset: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_presets() {
        let login = RateLimit::login();
        assert_eq!(login.max_requests, 5);
        assert_eq!(login.window_secs, 60);
        assert_eq!(login.key_prefix, "login");

        let leetcode = RateLimit::leetcode();
        assert_eq!(leetcode.max_requests, 20);
        assert_eq!(leetcode.key_prefix, "leetcode");

        assert_eq!(RateLimit::new(1, 86_400).window_secs, MAX_WINDOW_SECS);
    }

    #[test]
    fn test_window_counting() {
        let window = Duration::from_secs(60);
        let t0 = Instant::now();

        let w = bump(None, t0, window);
        assert_eq!(w.count, 1);
        let w = bump(Some(w), t0 + Duration::from_secs(30), window);
        assert_eq!(w.count, 2);
        assert_eq!(w.started, t0);

        // 窗口结束后重新计数
        let w = bump(Some(w), t0 + Duration::from_secs(60), window);
        assert_eq!(w.count, 1);
        assert_eq!(w.started, t0 + Duration::from_secs(60));
    }

    #[actix_web::test]
    async fn test_middleware_rejects_over_limit() {
        use actix_web::{App, HttpResponse, test, web};

        let app = test::init_service(
            App::new()
                .wrap(RateLimit::new(2, 60).with_prefix("unit-test"))
                .route("/", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        for _ in 0..2 {
            let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
            assert!(resp.status().is_success());
        }
        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    }
}
