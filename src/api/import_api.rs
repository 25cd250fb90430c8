// ==========================================
// 产品主数据管理系统 - 导入 API
// ==========================================
// 职责: 封装 CSV 上传导入功能
// ==========================================

use crate::api::error::ApiResult;
use crate::domain::product::ExistingRecord;
use crate::importer::{CsvParser, ProductImporter, ProductImporterImpl};
use serde::{Deserialize, Serialize};
use std::io::Cursor;

/// 导入API响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportApiResponse {
    /// 本次新增落库的记录数
    pub imported: usize,
    /// 批次总行数（含被跳过的行）
    pub total_rows: usize,
    /// 因已存在而跳过的记录（行号 + 派生键）
    pub skipped: Vec<ExistingRecord>,
    /// 批次ID（日志追溯用）
    pub batch_id: String,
    /// 导入耗时（毫秒）
    pub elapsed_ms: i64,
}

/// 导入API
pub struct ImportApi {
    db_path: String,
}

impl ImportApi {
    /// 创建新的ImportApi实例
    pub fn new(db_path: String) -> Self {
        Self { db_path }
    }

    /// 导入上传的 CSV 字节流
    ///
    /// # 参数
    /// - data: 上传文件内容
    ///
    /// # 返回
    /// - Ok(ImportApiResponse): 导入结果
    /// - Err(ApiError): 文件格式 / 校验 / 落库错误，均携带用户可读信息
    pub async fn import_csv(&self, data: &[u8]) -> ApiResult<ImportApiResponse> {
        // 解析（必需列缺失在此即拒绝）
        let records = CsvParser.parse_reader(Cursor::new(data))?;
        let total_rows = records.len();

        // 每次导入构造独立导入器（连接按操作作用域打开/释放）
        let importer = ProductImporterImpl::new(&self.db_path)?;
        let outcome = importer.import_records(records).await?;

        Ok(ImportApiResponse {
            imported: outcome.imported,
            total_rows,
            skipped: outcome.skipped,
            batch_id: outcome.batch_id,
            elapsed_ms: outcome.elapsed_ms,
        })
    }
}
