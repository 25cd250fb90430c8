// ==========================================
// 产品主数据管理系统 - 产品导入器实现
// ==========================================
// 职责: 整合导入流程，从批次到数据库
// 流程: 批次校验 → 作用域连接 → 存量比对 → 事务化落库
// ==========================================

use crate::domain::product::{ImportOutcome, RawProductRecord};
use crate::importer::duplicate_resolver::DuplicateResolver;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::CsvParser;
use crate::importer::product_importer::ProductImporter;
use crate::importer::validator::RecordValidator;
use crate::repository::ProductMasterRepository;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

// ==========================================
// ProductImporterImpl - 产品导入器实现
// ==========================================
pub struct ProductImporterImpl {
    // 数据库路径（每次导入打开一条作用域连接）
    db_path: String,

    // 导入组件
    file_parser: CsvParser,
    validator: RecordValidator,
    resolver: DuplicateResolver,
}

impl ProductImporterImpl {
    /// 创建新的 ProductImporter 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> ImportResult<Self> {
        Ok(Self {
            db_path: db_path.to_string(),
            file_parser: CsvParser,
            validator: RecordValidator::new()?,
            resolver: DuplicateResolver,
        })
    }
}

#[async_trait::async_trait]
impl ProductImporter for ProductImporterImpl {
    #[instrument(skip(self, records))]
    async fn import_records(&self, records: Vec<RawProductRecord>) -> ImportResult<ImportOutcome> {
        let start_time = Instant::now();
        let batch_id = Uuid::new_v4().to_string();

        info!(batch_id = %batch_id, rows = records.len(), "开始导入产品主数据");

        // === 步骤 1: 批次校验 ===
        debug!("步骤 1: 批次校验");
        let violations = self.validator.validate(&records);
        if !violations.is_empty() {
            warn!(violations = violations.len(), "批次校验未通过，整批拒绝");
            return Err(ImportError::ValidationFailed(violations.join("\n")));
        }

        // === 步骤 2: 打开作用域连接（随本次导入结束释放）===
        debug!("步骤 2: 打开数据库连接");
        let repo = ProductMasterRepository::new(&self.db_path)?;

        // === 步骤 3: 存量比对 ===
        debug!("步骤 3: 存量比对");
        let (existing, fresh) = self.resolver.partition(&records, &repo)?;
        if !existing.is_empty() {
            info!(skipped = existing.len(), "发现已存在记录，将跳过");
            for rec in &existing {
                debug!(
                    row = rec.row_number,
                    master_code = %rec.master_code,
                    "跳过已存在记录"
                );
            }
        }

        // === 步骤 4: 事务化落库 ===
        if fresh.is_empty() {
            info!("无新增记录，导入结束");
            return Ok(ImportOutcome {
                batch_id,
                imported: 0,
                skipped: existing,
                elapsed_ms: start_time.elapsed().as_millis() as i64,
            });
        }

        debug!(rows = fresh.len(), "步骤 4: 事务化落库");
        let imported = repo.insert_batch(&fresh)?;

        let elapsed_ms = start_time.elapsed().as_millis() as i64;
        info!(
            imported = imported,
            skipped = existing.len(),
            elapsed_ms = elapsed_ms,
            "导入完成"
        );

        Ok(ImportOutcome {
            batch_id,
            imported,
            skipped: existing,
            elapsed_ms,
        })
    }

    async fn import_from_csv<P: AsRef<Path> + Send>(
        &self,
        file_path: P,
    ) -> ImportResult<ImportOutcome> {
        let records = self.file_parser.parse_path(file_path)?;
        self.import_records(records).await
    }
}
