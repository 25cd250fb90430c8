// ==========================================
// 产品主数据管理系统 - 存量比对器
// ==========================================
// 职责: 将批次按派生主键切分为「已存在 / 新增」两组
// 约束: 只读操作；两组并集按行号等于整个批次，互不重叠
// ==========================================

use crate::domain::product::{derive_master_code, ExistingRecord, NewRecord, RawProductRecord};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::product_importer::MasterCodeStore;
use crate::repository::ProductMasterRepository;

pub struct DuplicateResolver;

impl DuplicateResolver {
    /// 按存量切分批次
    ///
    /// # 参数
    /// - records: 已通过批次校验的记录（product_no / color 均非空）
    /// - store: 存量探测能力（生产为仓储，测试为内存替身）
    ///
    /// # 返回
    /// - (已存在, 新增): 两组均保持批次内行序，行号沿用批次内 1 起始位置
    ///
    /// # 说明
    /// - 每行一次探测；探测与落库不在同一事务内，
    ///   并发重复由存储层主键约束兜底
    pub fn partition(
        &self,
        records: &[RawProductRecord],
        store: &dyn MasterCodeStore,
    ) -> ImportResult<(Vec<ExistingRecord>, Vec<NewRecord>)> {
        let mut existing = Vec::new();
        let mut fresh = Vec::new();

        for record in records {
            // 校验通过后必填字段必非空；此处兜底防御调用顺序错误
            let (product_no, color) = match (record.product_no.as_ref(), record.color.as_ref()) {
                (Some(p), Some(c)) => (p, c),
                _ => {
                    return Err(ImportError::InternalError(format!(
                        "存量比对收到未校验记录 (行 {})",
                        record.row_number
                    )))
                }
            };

            let master_code = derive_master_code(product_no, color);

            if store.contains(&master_code)? {
                existing.push(ExistingRecord {
                    row_number: record.row_number,
                    master_code,
                    product_no: product_no.clone(),
                    color: color.clone(),
                });
            } else {
                fresh.push(NewRecord {
                    row_number: record.row_number,
                    master_code,
                    product_no: product_no.clone(),
                    color: color.clone(),
                    group_code: record.group_code.clone(),
                    product_name: record.product_name.clone(),
                });
            }
        }

        Ok((existing, fresh))
    }
}

// ==========================================
// 生产实现: 仓储即存量探测能力
// ==========================================
impl MasterCodeStore for ProductMasterRepository {
    fn contains(&self, master_code: &str) -> crate::repository::RepositoryResult<bool> {
        self.exists(master_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::RepositoryResult;
    use std::collections::HashSet;

    /// 内存存量替身（不依赖真实数据库）
    struct InMemoryStore {
        codes: HashSet<String>,
    }

    impl InMemoryStore {
        fn with(codes: &[&str]) -> Self {
            Self {
                codes: codes.iter().map(|c| c.to_string()).collect(),
            }
        }
    }

    impl MasterCodeStore for InMemoryStore {
        fn contains(&self, master_code: &str) -> RepositoryResult<bool> {
            Ok(self.codes.contains(master_code))
        }
    }

    fn record(product_no: &str, color: &str, row_number: usize) -> RawProductRecord {
        RawProductRecord {
            product_no: Some(product_no.to_string()),
            color: Some(color.to_string()),
            group_code: None,
            product_name: None,
            row_number,
        }
    }

    #[test]
    fn test_partition_all_new() {
        let resolver = DuplicateResolver;
        let store = InMemoryStore::with(&[]);
        let records = vec![record("B2", "BLU", 1), record("A1", "RED", 2)];

        let (existing, fresh) = resolver.partition(&records, &store).unwrap();

        assert!(existing.is_empty());
        assert_eq!(fresh.len(), 2);
        assert_eq!(fresh[0].master_code, "B2_BLU");
        assert_eq!(fresh[0].row_number, 1);
    }

    #[test]
    fn test_partition_mixed() {
        let resolver = DuplicateResolver;
        let store = InMemoryStore::with(&["B2_BLU"]);
        let records = vec![
            record("B2", "BLU", 1),
            record("A1", "RED", 2),
            record("C3", "GRN", 3),
        ];

        let (existing, fresh) = resolver.partition(&records, &store).unwrap();

        assert_eq!(existing.len(), 1);
        assert_eq!(existing[0].row_number, 1);
        assert_eq!(existing[0].master_code, "B2_BLU");
        assert_eq!(fresh.len(), 2);
        // 两组保持批次内行序
        assert_eq!(fresh[0].row_number, 2);
        assert_eq!(fresh[1].row_number, 3);
    }

    #[test]
    fn test_partition_completeness() {
        let resolver = DuplicateResolver;
        let store = InMemoryStore::with(&["A1_RED"]);
        let records = vec![record("B2", "BLU", 1), record("A1", "RED", 2)];

        let (existing, fresh) = resolver.partition(&records, &store).unwrap();

        // 并集按行号覆盖整个批次，互不重叠
        let mut rows: Vec<usize> = existing
            .iter()
            .map(|r| r.row_number)
            .chain(fresh.iter().map(|r| r.row_number))
            .collect();
        rows.sort_unstable();
        assert_eq!(rows, vec![1, 2]);
    }

    #[test]
    fn test_partition_rejects_unvalidated_record() {
        let resolver = DuplicateResolver;
        let store = InMemoryStore::with(&[]);
        let records = vec![RawProductRecord {
            product_no: None,
            color: Some("BLU".to_string()),
            group_code: None,
            product_name: None,
            row_number: 1,
        }];

        let result = resolver.partition(&records, &store);
        assert!(matches!(result, Err(ImportError::InternalError(_))));
    }
}
