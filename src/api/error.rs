// ==========================================
// 产品主数据管理系统 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，转换下层错误为用户友好的错误消息
// ==========================================

use crate::exporter::ExportError;
use crate::importer::ImportError;
use crate::repository::RepositoryError;
use thiserror::Error;

/// API层错误类型
/// 所有错误信息必须包含显式原因，原样呈现给用户
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 请求与文件格式错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("文件格式错误: {0}")]
    FileFormatError(String),

    // ==========================================
    // 导入业务错误
    // ==========================================
    #[error("数据校验失败: {0}")]
    ValidationError(String),

    #[error("导入失败: {0}")]
    ImportFailed(String),

    // ==========================================
    // 数据访问错误
    // ==========================================
    #[error("数据库错误: {0}")]
    DatabaseError(String),

    #[error("数据库连接失败: {0}")]
    DatabaseConnectionError(String),

    // ==========================================
    // 导出错误
    // ==========================================
    #[error("导出失败: {0}")]
    ExportFailed(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    /// 是否为用户侧错误（HTTP 层据此选择 400 / 500）
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            ApiError::InvalidInput(_)
                | ApiError::FileFormatError(_)
                | ApiError::ValidationError(_)
                | ApiError::ImportFailed(_)
        )
    }
}

// ==========================================
// 从 RepositoryError 转换
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::DatabaseConnectionError(msg) => ApiError::DatabaseConnectionError(msg),
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseConnectionError(format!("数据库锁获取失败: {}", msg))
            }
            RepositoryError::InsertFailed { row, message } => {
                ApiError::ImportFailed(format!("行 {}: {}", row, message))
            }
            RepositoryError::InternalError(msg) => ApiError::InternalError(msg),
            RepositoryError::Other(err) => ApiError::Other(err),
            other => ApiError::DatabaseError(other.to_string()),
        }
    }
}

// ==========================================
// 从 ImportError 转换
// 目的: 文件问题 → 文件格式错误；批次违规 → 校验错误；
//       行级落库失败保留行号语义
// ==========================================
impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::FileNotFound(_)
            | ImportError::UnsupportedFormat(_)
            | ImportError::MissingRequiredColumns(_)
            | ImportError::CsvParseError(_) => ApiError::FileFormatError(err.to_string()),
            ImportError::ValidationFailed(msg) => ApiError::ValidationError(msg),
            ImportError::RowInsertError { row, message } => {
                ApiError::ImportFailed(format!("行 {}: {}", row, message))
            }
            ImportError::DatabaseConnectionError(msg) => ApiError::DatabaseConnectionError(msg),
            ImportError::DatabaseQueryError(msg) => ApiError::DatabaseError(msg),
            ImportError::InternalError(msg) => ApiError::InternalError(msg),
            ImportError::Other(err) => ApiError::Other(err),
        }
    }
}

// ==========================================
// 从 ExportError 转换
// ==========================================
impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        ApiError::ExportFailed(err.to_string())
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
