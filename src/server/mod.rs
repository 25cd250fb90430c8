// ==========================================
// 产品主数据管理系统 - HTTP 服务层
// ==========================================
// 职责: 路由配置、上传处理、静态页面，业务规则一律下沉 API 层
//
// 提供的路由:
// - `GET /api/catalog`: 目录视图查询（search/sort_by/order/page/page_size）
// - `POST /api/catalog/import`: multipart/form-data 上传，`file` 字段为 CSV
// - `GET /api/catalog/export`: 与查询相同参数，响应 .xlsx 附件
// - 其余路径回落到内嵌单页 UI
// ==========================================

use crate::api::{ApiError, CatalogApi, CatalogQuery, ImportApi};
use crate::config::AppConfig;
use actix_multipart::Multipart;
use actix_web::web::{get, post, scope};
use actix_web::{web, HttpRequest, HttpResponse, Responder, Scope};
use futures_util::StreamExt;
use include_dir::{include_dir, Dir};
use mime_guess::from_path;
use tracing::warn;

static STATIC_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/static/dist");

const API_PATH: &str = "/api/catalog";

/// 上传文件大小上限（10 MB）
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Excel MIME 类型
const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// 配置并返回目录相关路由
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        // 目录视图查询
        .route("", get().to(get_catalog))
        // CSV 上传导入
        .route("/import", post().to(import_catalog))
        // 当前视图导出为 Excel
        .route("/export", get().to(export_catalog))
}

/// 错误 → HTTP 响应（用户侧错误 400，其余 500）
fn error_response(err: &ApiError) -> HttpResponse {
    warn!(error = %err, "请求处理失败");
    if err.is_user_error() {
        HttpResponse::BadRequest().body(format!("Error: {}", err))
    } else {
        HttpResponse::InternalServerError().body(format!("Error: {}", err))
    }
}

/// GET /api/catalog
async fn get_catalog(
    config: web::Data<AppConfig>,
    query: web::Query<CatalogQuery>,
) -> impl Responder {
    let api = CatalogApi::new(config.db_path.clone());
    match api.query(&query) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(e) => error_response(&e),
    }
}

/// POST /api/catalog/import
async fn import_catalog(config: web::Data<AppConfig>, payload: Multipart) -> impl Responder {
    let data = match read_csv_field(payload).await {
        Ok(data) => data,
        Err(msg) => return HttpResponse::BadRequest().body(format!("Error: {}", msg)),
    };

    let api = ImportApi::new(config.db_path.clone());
    match api.import_csv(&data).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => error_response(&e),
    }
}

/// GET /api/catalog/export
async fn export_catalog(
    config: web::Data<AppConfig>,
    query: web::Query<CatalogQuery>,
) -> impl Responder {
    let api = CatalogApi::new(config.db_path.clone());
    match api.export(&query) {
        Ok(buffer) => HttpResponse::Ok()
            .content_type(XLSX_CONTENT_TYPE)
            .insert_header((
                "Content-Disposition",
                "attachment; filename=\"master_sheet.xlsx\"",
            ))
            .body(buffer),
        Err(e) => error_response(&e),
    }
}

/// 从 multipart 流中读取 `file` 字段内容
///
/// - 仅接受 .csv 扩展名
/// - 超出大小上限立即中止
async fn read_csv_field(mut payload: Multipart) -> Result<Vec<u8>, String> {
    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| format!("上传解析失败: {}", e))?;

        let field_name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()));
        if field_name.as_deref() != Some("file") {
            continue;
        }

        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename().map(|f| f.to_string()))
            .unwrap_or_default();
        if !filename.to_lowercase().ends_with(".csv") {
            return Err("文件必须以 .csv 结尾".to_string());
        }

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| format!("上传读取失败: {}", e))?;
            if bytes.len() + chunk.len() > MAX_UPLOAD_BYTES {
                return Err("文件超出大小上限 (10 MB)".to_string());
            }
            bytes.extend_from_slice(&chunk);
        }
        return Ok(bytes);
    }

    Err("缺少 file 字段".to_string())
}

/// 内嵌静态页面（单页 UI；未知路径回落到 index.html）
pub async fn serve_embedded(req: HttpRequest) -> HttpResponse {
    let path = req.path().trim_start_matches('/');
    let file_path = if path.is_empty() { "index.html" } else { path };

    match STATIC_DIR.get_file(file_path) {
        Some(file) => {
            let mime = from_path(file_path).first_or_octet_stream();
            HttpResponse::Ok()
                .content_type(mime.as_ref())
                .body(file.contents().to_vec())
        }
        None => match STATIC_DIR.get_file("index.html") {
            Some(index) => HttpResponse::Ok()
                .content_type("text/html; charset=utf-8")
                .body(index.contents().to_vec()),
            None => HttpResponse::NotFound().body("Not Found"),
        },
    }
}
