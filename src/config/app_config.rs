// ==========================================
// 产品主数据管理系统 - 应用配置
// ==========================================
// 职责: 从环境变量解析运行配置，提供平台默认值
// ==========================================

use std::path::PathBuf;

/// 应用配置
///
/// 所有字段在进程启动时解析一次，随后以只读方式注入各层。
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// 数据库文件路径
    pub db_path: String,
    /// HTTP 监听地址
    pub host: String,
    /// HTTP 监听端口
    pub port: u16,
}

impl AppConfig {
    /// 从环境变量构造配置
    ///
    /// # 环境变量
    /// - MASTER_SHEET_DB: 数据库文件路径（默认: 用户数据目录下 master-sheet/master.db）
    /// - MASTER_SHEET_HOST: 监听地址（默认: 127.0.0.1）
    /// - MASTER_SHEET_PORT: 监听端口（默认: 8080）
    pub fn from_env() -> Self {
        let db_path = match std::env::var("MASTER_SHEET_DB") {
            Ok(path) if !path.trim().is_empty() => path.trim().to_string(),
            _ => default_db_path(),
        };

        let host = std::env::var("MASTER_SHEET_HOST")
            .ok()
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(|| "127.0.0.1".to_string());

        let port = std::env::var("MASTER_SHEET_PORT")
            .ok()
            .and_then(|p| p.trim().parse::<u16>().ok())
            .unwrap_or(8080);

        Self { db_path, host, port }
    }
}

/// 默认数据库路径
///
/// 使用用户数据目录，避免在工作目录散落数据文件；
/// 目录不存在时尝试创建，失败则回退到当前目录。
pub fn default_db_path() -> String {
    let mut path = PathBuf::from("./master_sheet.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("master-sheet");
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("master.db");
        }
    }

    path.to_string_lossy().to_string()
}
