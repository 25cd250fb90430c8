// ==========================================
// 产品主数据管理系统 - 批次校验器
// ==========================================
// 职责: 必填 / 字符集 / 批次内重复 三类规则
// 约束: 批次级全有全无，任一违规即整批拒绝，不做部分通过
// ==========================================

use crate::domain::product::RawProductRecord;
use crate::importer::error::{ImportError, ImportResult};
use regex::Regex;
use std::collections::HashMap;

/// product_no / color 的合法字符集
const FIELD_PATTERN: &str = "^[A-Za-z0-9-]+$";

pub struct RecordValidator {
    field_re: Regex,
}

impl RecordValidator {
    pub fn new() -> ImportResult<Self> {
        let field_re = Regex::new(FIELD_PATTERN)
            .map_err(|e| ImportError::InternalError(format!("正则编译失败: {}", e)))?;
        Ok(Self { field_re })
    }

    /// 校验整个批次
    ///
    /// # 返回
    /// - 空列表: 批次干净，可以进入存量比对
    /// - 非空列表: 面向用户的违规描述；调用方必须整批拒绝
    ///
    /// # 规则
    /// - 必填: 任一行 product_no / color 为空 → 每个字段整批报告一次
    /// - 字符集: 任一行不匹配 [A-Za-z0-9-]+ → 每个字段整批报告一次
    /// - 批次内重复: 相同 (product_no, color) 的行聚合后连同取值一并报告
    pub fn validate(&self, records: &[RawProductRecord]) -> Vec<String> {
        let mut errors = Vec::new();

        // ===== 必填检查 =====
        if records.iter().any(|r| r.product_no.is_none()) {
            errors.push("品号(product_no)不能为空".to_string());
        }
        if records.iter().any(|r| r.color.is_none()) {
            errors.push("颜色(color)不能为空".to_string());
        }

        // ===== 字符集检查（仅检查非空值，空值已由必填规则覆盖）=====
        if records
            .iter()
            .filter_map(|r| r.product_no.as_deref())
            .any(|v| !self.field_re.is_match(v))
        {
            errors.push("品号(product_no)只能包含字母、数字与连字符".to_string());
        }
        if records
            .iter()
            .filter_map(|r| r.color.as_deref())
            .any(|v| !self.field_re.is_match(v))
        {
            errors.push("颜色(color)只能包含字母、数字与连字符".to_string());
        }

        // ===== 批次内重复检查 =====
        let duplicates = self.collect_duplicates(records);
        if !duplicates.is_empty() {
            let detail: Vec<String> = duplicates
                .iter()
                .map(|(product_no, color, rows)| {
                    let row_list: Vec<String> = rows.iter().map(|r| r.to_string()).collect();
                    format!("{}/{} (行 {})", product_no, color, row_list.join(", "))
                })
                .collect();
            errors.push(format!("品号+颜色组合重复: {}", detail.join("；")));
        }

        errors
    }

    /// 聚合批次内重复的 (product_no, color) 组合
    ///
    /// # 返回
    /// - Vec<(品号, 颜色, 行号列表)>: 按首次出现顺序，仅含出现 2 次以上的组合
    fn collect_duplicates(
        &self,
        records: &[RawProductRecord],
    ) -> Vec<(String, String, Vec<usize>)> {
        let mut rows_by_key: HashMap<(String, String), Vec<usize>> = HashMap::new();
        let mut key_order: Vec<(String, String)> = Vec::new();

        for record in records {
            if let (Some(product_no), Some(color)) =
                (record.product_no.as_ref(), record.color.as_ref())
            {
                let key = (product_no.clone(), color.clone());
                let entry = rows_by_key.entry(key.clone()).or_default();
                if entry.is_empty() {
                    key_order.push(key);
                }
                entry.push(record.row_number);
            }
        }

        key_order
            .into_iter()
            .filter_map(|key| {
                let rows = rows_by_key.remove(&key)?;
                if rows.len() > 1 {
                    Some((key.0, key.1, rows))
                } else {
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(product_no: Option<&str>, color: Option<&str>, row_number: usize) -> RawProductRecord {
        RawProductRecord {
            product_no: product_no.map(|s| s.to_string()),
            color: color.map(|s| s.to_string()),
            group_code: None,
            product_name: None,
            row_number,
        }
    }

    #[test]
    fn test_clean_batch() {
        let validator = RecordValidator::new().unwrap();
        let records = vec![record(Some("B2"), Some("BLU"), 1), record(Some("A-1"), Some("RED"), 2)];
        assert!(validator.validate(&records).is_empty());
    }

    #[test]
    fn test_missing_product_no() {
        let validator = RecordValidator::new().unwrap();
        let records = vec![record(None, Some("BLU"), 1)];

        let errors = validator.validate(&records);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("品号"));
    }

    #[test]
    fn test_missing_both_reported_once_each() {
        let validator = RecordValidator::new().unwrap();
        let records = vec![
            record(None, None, 1),
            record(None, Some("BLU"), 2),
            record(Some("B2"), None, 3),
        ];

        // 每个字段整批报告一次，而非逐行
        let errors = validator.validate(&records);
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_pattern_violation() {
        let validator = RecordValidator::new().unwrap();
        let records = vec![record(Some("B 2"), Some("BLU"), 1)];

        let errors = validator.validate(&records);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("product_no"));
    }

    #[test]
    fn test_pattern_violation_color_underscore() {
        let validator = RecordValidator::new().unwrap();
        let records = vec![record(Some("B2"), Some("BL_U"), 1)];

        let errors = validator.validate(&records);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("color"));
    }

    #[test]
    fn test_duplicate_combination() {
        let validator = RecordValidator::new().unwrap();
        let records = vec![
            record(Some("A1"), Some("RED"), 1),
            record(Some("A1"), Some("RED"), 2),
        ];

        let errors = validator.validate(&records);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("A1/RED"));
        assert!(errors[0].contains("行 1, 2"));
    }

    #[test]
    fn test_duplicate_multiple_combinations() {
        let validator = RecordValidator::new().unwrap();
        let records = vec![
            record(Some("A1"), Some("RED"), 1),
            record(Some("B2"), Some("BLU"), 2),
            record(Some("A1"), Some("RED"), 3),
            record(Some("B2"), Some("BLU"), 4),
        ];

        let errors = validator.validate(&records);
        assert_eq!(errors.len(), 1);
        // 按首次出现顺序聚合
        assert!(errors[0].contains("A1/RED"));
        assert!(errors[0].contains("B2/BLU"));
    }

    #[test]
    fn test_same_product_no_different_color_is_ok() {
        let validator = RecordValidator::new().unwrap();
        let records = vec![
            record(Some("A1"), Some("RED"), 1),
            record(Some("A1"), Some("BLU"), 2),
        ];
        assert!(validator.validate(&records).is_empty());
    }
}
