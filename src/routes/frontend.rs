//! 作品集静态页面路由
//!
//! 使用 rust-embed 嵌入 frontend/dist/ 下的页面与脚本，支持：
//! - `/` 返回 index.html，未知路径回退到 index.html
//! - `frontend.custom_dir` 配置的本地目录优先（改页面时无需重新编译）

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use rust_embed::Embed;
use std::path::Path;

use crate::config::AppConfig;

/// 嵌入前端静态资源
/// 编译时从 frontend/dist/ 目录读取文件
#[derive(Embed)]
#[folder = "frontend/dist/"]
struct FrontendAssets;

/// 获取文件的 MIME 类型
fn get_mime_type(path: &str) -> &'static str {
    let ext = Path::new(path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("");

    match ext {
        "html" => "text/html; charset=utf-8",
        "js" => "application/javascript; charset=utf-8",
        "mjs" => "application/javascript; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "json" => "application/json; charset=utf-8",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "eot" => "application/vnd.ms-fontobject",
        "webp" => "image/webp",
        "webm" => "video/webm",
        "mp4" => "video/mp4",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "pdf" => "application/pdf",
        "xml" => "application/xml",
        "txt" => "text/plain; charset=utf-8",
        "wasm" => "application/wasm",
        "map" => "application/json",
        _ => "application/octet-stream",
    }
}

/// 检查是否应该设置缓存
fn should_cache(path: &str) -> bool {
    let ext = Path::new(path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("");

    // 图片与字体很少变动，可以长期缓存；脚本和样式随页面一起更新
    matches!(
        ext,
        "woff" | "woff2" | "ttf" | "eot" | "png" | "jpg" | "jpeg" | "gif" | "svg" | "webp" | "ico"
    )
}

/// 拒绝跳出资源目录的路径
fn is_safe_path(path: &str) -> bool {
    !path.split(['/', '\\']).any(|segment| segment == "..")
}

/// 尝试从自定义目录读取文件
fn try_custom_file(custom_dir: &str, path: &str) -> Option<Vec<u8>> {
    if custom_dir.is_empty() {
        return None;
    }
    std::fs::read(Path::new(custom_dir).join(path)).ok()
}

/// 尝试从嵌入的资源中获取文件
fn get_embedded_file(path: &str) -> Option<Vec<u8>> {
    FrontendAssets::get(path).map(|f| f.data.to_vec())
}

/// 获取文件内容（优先自定义目录，然后嵌入资源）
fn get_file(custom_dir: &str, path: &str) -> Option<Vec<u8>> {
    if !is_safe_path(path) {
        return None;
    }
    try_custom_file(custom_dir, path).or_else(|| get_embedded_file(path))
}

/// 按路径查找资源，返回内容和实际命中的文件名
fn resolve_asset<'a>(custom_dir: &str, path: &'a str) -> (Option<Vec<u8>>, &'a str) {
    if path.is_empty() {
        return (get_file(custom_dir, "index.html"), "index.html");
    }
    match get_file(custom_dir, path) {
        Some(content) => (Some(content), path),
        None => (get_file(custom_dir, "index.html"), "index.html"),
    }
}

/// 前端资源请求处理
pub async fn serve_frontend(req: HttpRequest) -> ActixResult<HttpResponse> {
    let path = req.match_info().query("tail").trim_start_matches('/');
    let config = AppConfig::get();

    let (content, file_path) = resolve_asset(&config.frontend.custom_dir, path);

    match content {
        Some(data) => {
            let mut response = HttpResponse::Ok();
            response.content_type(get_mime_type(file_path));

            // 设置缓存头
            if should_cache(file_path) {
                response.insert_header(("Cache-Control", "public, max-age=86400"));
            } else {
                response.insert_header(("Cache-Control", "no-cache, no-store, must-revalidate"));
            }

            Ok(response.body(data))
        }
        None => Ok(HttpResponse::NotFound()
            .content_type("text/html; charset=utf-8")
            .body(
                r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Portfolio</title>
</head>
<body>
    <h1>Page Not Found</h1>
    <p>The site pages have not been embedded into this build.</p>
    <p>Place the pages under <code>frontend/dist/</code> and rebuild.</p>
</body>
</html>"#,
            )),
    }
}

/// 配置前端路由（必须最后注册，作为兜底）
pub fn configure_frontend_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/{tail:.*}", web::get().to(serve_frontend));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_mime_type() {
        assert_eq!(get_mime_type("index.html"), "text/html; charset=utf-8");
        assert_eq!(
            get_mime_type("script.js"),
            "application/javascript; charset=utf-8"
        );
        assert_eq!(get_mime_type("style.css"), "text/css; charset=utf-8");
        assert_eq!(get_mime_type("image.png"), "image/png");
        assert_eq!(get_mime_type("unknown.xyz"), "application/octet-stream");
    }

    #[test]
    fn test_should_cache() {
        assert!(should_cache("logo.png"));
        assert!(should_cache("fonts/inter.woff2"));
        assert!(!should_cache("script.js"));
        assert!(!should_cache("index.html"));
    }

    #[test]
    fn test_parent_segments_are_rejected() {
        assert!(is_safe_path("submissions.html"));
        assert!(is_safe_path("img/a..b.png"));
        assert!(!is_safe_path("../Cargo.toml"));
        assert!(!is_safe_path("img/../../etc/passwd"));
        assert!(!is_safe_path("..\\secret"));
    }

    #[test]
    fn test_embedded_pages_resolve() {
        let (content, file) = resolve_asset("", "");
        assert_eq!(file, "index.html");
        assert!(content.is_some());

        let (content, file) = resolve_asset("", "submissions.html");
        assert_eq!(file, "submissions.html");
        assert!(content.is_some());
    }

    #[test]
    fn test_unknown_path_falls_back_to_index() {
        let (_, file) = resolve_asset("", "about/me");
        assert_eq!(file, "index.html");

        let (_, file) = resolve_asset("", "../Cargo.toml");
        assert_eq!(file, "index.html");
    }

    #[test]
    fn test_custom_dir_overrides_embedded() {
        let dir = std::env::temp_dir().join(format!("portfolio-custom-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("index.html"), "<p>custom</p>").unwrap();

        let (content, file) = resolve_asset(dir.to_str().unwrap(), "");
        assert_eq!(file, "index.html");
        assert_eq!(content.unwrap(), b"<p>custom</p>".to_vec());

        std::fs::remove_dir_all(&dir).ok();
    }
}
