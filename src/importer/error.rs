// ==========================================
// 产品主数据管理系统 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use crate::repository::error::RepositoryError;
use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .csv）")]
    UnsupportedFormat(String),

    #[error("缺少必需列: {0}")]
    MissingRequiredColumns(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    // ===== 批次校验错误（整批拒绝，携带全部违规信息）=====
    #[error("数据校验失败:\n{0}")]
    ValidationFailed(String),

    // ===== 数据库错误 =====
    #[error("数据库连接失败: {0}")]
    DatabaseConnectionError(String),

    #[error("数据库查询失败: {0}")]
    DatabaseQueryError(String),

    #[error("导入失败 (行 {row}): {message}")]
    RowInsertError { row: usize, message: String },

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

// 实现 From<RepositoryError>
// 目的: 保留行号语义（InsertFailed → RowInsertError），其余折叠为连接/查询错误
impl From<RepositoryError> for ImportError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::DatabaseConnectionError(msg) => {
                ImportError::DatabaseConnectionError(msg)
            }
            RepositoryError::InsertFailed { row, message } => {
                ImportError::RowInsertError { row, message }
            }
            other => ImportError::DatabaseQueryError(other.to_string()),
        }
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
