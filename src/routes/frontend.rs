//! 前端静态资源
//!
//! 前端构建产物在编译期通过 rust-embed 打进二进制。
//! 非 API 路径找不到文件时回退到 index.html，交给前端路由处理。

use actix_web::http::header::{CACHE_CONTROL, ContentType};
use actix_web::{HttpRequest, HttpResponse, web};
use rust_embed::Embed;

use crate::models::{ApiResponse, ErrorCode};

#[derive(Embed)]
#[folder = "frontend/dist/"]
struct FrontendAssets;

const INDEX: &str = "index.html";
const API_PREFIX: &str = "api/";

fn extension(path: &str) -> &str {
    path.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("")
}

fn mime_for(path: &str) -> &'static str {
    match extension(path) {
        "html" => "text/html; charset=utf-8",
        "js" | "mjs" => "application/javascript; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "json" | "map" | "webmanifest" => "application/json",
        "svg" => "image/svg+xml",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "ico" => "image/x-icon",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "txt" => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

// 打包产物带 hash，可以长期缓存；index.html 不能
fn is_immutable_asset(path: &str) -> bool {
    path.starts_with("assets/")
        && matches!(
            extension(path),
            "js" | "mjs" | "css" | "woff" | "woff2" | "png" | "jpg" | "jpeg" | "svg" | "webp"
        )
}

/// 解析请求路径对应的嵌入文件，返回 (文件路径, 是否 SPA 回退)
fn resolve(path: &str) -> Option<(&str, bool)> {
    if !path.is_empty() && FrontendAssets::get(path).is_some() {
        return Some((path, false));
    }
    FrontendAssets::get(INDEX).map(|_| (INDEX, !path.is_empty()))
}

pub async fn serve_frontend(req: HttpRequest) -> HttpResponse {
    let path = req.match_info().query("tail").trim_start_matches('/');

    // 未匹配的 API 请求返回 JSON 404，而不是页面
    if path.starts_with(API_PREFIX) {
        return HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NotFound,
            "API endpoint not found",
        ));
    }

    let Some((file, fallback)) = resolve(path) else {
        return HttpResponse::NotFound()
            .insert_header(ContentType::plaintext())
            .body("SkillHub frontend has not been built");
    };
    let Some(asset) = FrontendAssets::get(file) else {
        return HttpResponse::NotFound().finish();
    };

    if fallback {
        tracing::trace!("SPA fallback for /{}", path);
    }

    let cache_control = if is_immutable_asset(file) {
        "public, max-age=31536000, immutable"
    } else {
        "no-cache"
    };

    HttpResponse::Ok()
        .content_type(mime_for(file))
        .insert_header((CACHE_CONTROL, cache_control))
        .body(asset.data.into_owned())
}

/// 必须最后注册，兜底所有 GET 请求
pub fn configure_frontend_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/{tail:.*}", web::get().to(serve_frontend));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_for() {
        assert_eq!(mime_for("index.html"), "text/html; charset=utf-8");
        assert_eq!(
            mime_for("assets/index-3f2a.js"),
            "application/javascript; charset=utf-8"
        );
        assert_eq!(mime_for("site.webmanifest"), "application/json");
        assert_eq!(mime_for("README"), "application/octet-stream");
    }

    #[test]
    fn test_immutable_assets_only_under_assets_dir() {
        assert!(is_immutable_asset("assets/index-3f2a.js"));
        assert!(is_immutable_asset("assets/logo.svg"));
        assert!(!is_immutable_asset("index.html"));
        assert!(!is_immutable_asset("favicon.png"));
    }

    #[actix_web::test]
    async fn test_unknown_api_path_is_json_404() {
        use actix_web::{App, test};

        let app =
            test::init_service(App::new().configure(configure_frontend_routes)).await;
        let req = test::TestRequest::get()
            .uri("/api/v1/does-not-exist")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], ErrorCode::NotFound as i32);
    }
}
