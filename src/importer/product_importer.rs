// ==========================================
// 产品主数据管理系统 - 导入 Trait
// ==========================================
// 职责: 定义导入接口与存量探测能力（不包含实现）
// ==========================================

use crate::domain::product::{ImportOutcome, RawProductRecord};
use crate::importer::error::ImportResult;
use crate::repository::error::RepositoryResult;
use async_trait::async_trait;
use std::path::Path;

// ==========================================
// MasterCodeStore Trait
// ==========================================
// 用途: 存量比对的存储探测能力（按派生主键逐行探测）
// 实现者: ProductMasterRepository（生产）、内存 HashSet（测试替身）
pub trait MasterCodeStore {
    /// 探测派生主键是否已存在于持久层
    ///
    /// # 参数
    /// - master_code: 派生主键
    ///
    /// # 返回
    /// - Ok(true): 已存在（该行将被跳过并报告）
    /// - Ok(false): 不存在（该行进入落库阶段）
    fn contains(&self, master_code: &str) -> RepositoryResult<bool>;
}

// ==========================================
// ProductImporter Trait
// ==========================================
// 用途: 导入主接口
// 实现者: ProductImporterImpl
#[async_trait]
pub trait ProductImporter: Send + Sync {
    /// 导入已解析的批次
    ///
    /// # 参数
    /// - records: 已 TRIM / 空值标准化的批次记录
    ///
    /// # 返回
    /// - Ok(ImportOutcome): 新增数量 + 跳过明细
    /// - Err(ValidationFailed): 批次违规，未发生任何数据库访问
    /// - Err(RowInsertError): 某行落库失败，整批已回滚
    ///
    /// # 导入流程（4个阶段）
    /// 1. 批次校验（必填 / 字符集 / 批次内重复）
    /// 2. 打开作用域连接
    /// 3. 存量比对（已存在 → 跳过并报告）
    /// 4. 事务化落库（全有全无），提交后返回新增数量
    async fn import_records(&self, records: Vec<RawProductRecord>) -> ImportResult<ImportOutcome>;

    /// 从 CSV 文件导入
    ///
    /// # 参数
    /// - file_path: CSV 文件路径（.csv）
    async fn import_from_csv<P: AsRef<Path> + Send>(
        &self,
        file_path: P,
    ) -> ImportResult<ImportOutcome>;
}
