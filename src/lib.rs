// ==========================================
// 产品主数据管理系统 - 核心库
// ==========================================
// 技术栈: actix-web + Rust + SQLite
// 系统定位: 内部数据录入工具 (产品目录维护)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 导入层 - 外部数据
pub mod importer;

// 导出层 - 报表文件生成
pub mod exporter;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// 服务层 - HTTP 路由与静态页面
pub mod server;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域实体
pub use domain::product::{
    derive_master_code, ExistingRecord, ImportOutcome, NewRecord, ProductMaster,
    RawProductRecord,
};

// 导入管道
pub use importer::{
    CsvParser, DuplicateResolver, ImportError, ImportResult, MasterCodeStore, ProductImporter,
    ProductImporterImpl, RecordValidator,
};

// 仓储
pub use repository::{ProductMasterRepository, RepositoryError, RepositoryResult};

// API
pub use api::{ApiError, ApiResult, CatalogApi, ImportApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "产品主数据管理系统";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
