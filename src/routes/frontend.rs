//! 前端静态页面路由
//!
//! 页面在编译时通过 rust-embed 嵌入（`frontend/dist/`），包括：
//! - `index.html` 首页（登录入口）
//! - `lecturer/list.html` 讲师页面
//! - `student/list.html` 学生页面
//!
//! `./frontend-custom/` 下存在同名文件时优先使用，便于本地调整页面。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use rust_embed::Embed;
use std::path::Path;

#[derive(Embed)]
#[folder = "frontend/dist/"]
struct PortalPages;

/// 获取文件的 MIME 类型
fn get_mime_type(path: &str) -> &'static str {
    let ext = Path::new(path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("");

    match ext {
        "html" => "text/html; charset=utf-8",
        "js" | "mjs" => "application/javascript; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "json" => "application/json; charset=utf-8",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "woff2" => "font/woff2",
        _ => "application/octet-stream",
    }
}

/// 带 hash 的静态资源可以长期缓存
fn should_cache(path: &str) -> bool {
    path.starts_with("assets/")
        && matches!(
            Path::new(path).extension().and_then(|s| s.to_str()),
            Some("js" | "css" | "png" | "svg" | "woff2")
        )
}

/// 获取文件内容（优先自定义目录，然后嵌入资源）
fn get_file(path: &str) -> Option<Vec<u8>> {
    // 拒绝目录穿越
    if path.split('/').any(|segment| segment == "..") {
        return None;
    }
    std::fs::read(format!("./frontend-custom/{path}"))
        .ok()
        .or_else(|| PortalPages::get(path).map(|f| f.data.to_vec()))
}

/// 把请求路径映射到页面文件，目录请求使用其中的 index.html
fn resolve_path(path: &str) -> String {
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        "index.html".to_string()
    } else if path.ends_with('/') {
        format!("{path}index.html")
    } else {
        path.to_string()
    }
}

/// 静态页面请求处理
pub async fn serve_page(req: HttpRequest) -> ActixResult<HttpResponse> {
    let file_path = resolve_path(req.match_info().query("tail"));

    match get_file(&file_path) {
        Some(data) => {
            let mut response = HttpResponse::Ok();
            response.content_type(get_mime_type(&file_path));

            if should_cache(&file_path) {
                response.insert_header(("Cache-Control", "public, max-age=31536000, immutable"));
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
<head><meta charset="utf-8"><title>LVA Portal</title></head>
<body><h1>Page Not Found</h1><p><a href="/">Back to start</a></p></body>
</html>"#,
            )),
    }
}

/// 配置前端路由（放在最后作为兜底）
pub fn configure_frontend_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/{tail:.*}", web::get().to(serve_page));
}
