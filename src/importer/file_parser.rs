// ==========================================
// 产品主数据管理系统 - CSV 文件解析器
// ==========================================
// 职责: CSV → RawProductRecord 列表
// 约束: 必需列缺失在任何校验之前立即拒绝
// ==========================================

use crate::domain::product::RawProductRecord;
use crate::importer::error::{ImportError, ImportResult};
use csv::ReaderBuilder;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// 必需列（缺一即拒绝整个文件）
pub const REQUIRED_COLUMNS: [&str; 2] = ["product_no", "color"];

/// 可选列
pub const OPTIONAL_COLUMNS: [&str; 2] = ["group_code", "product_name"];

// ==========================================
// CsvParser 实现
// ==========================================
pub struct CsvParser;

impl CsvParser {
    /// 从任意 Read 源解析（HTTP 上传字节流走此入口）
    ///
    /// # 返回
    /// - Ok(Vec<RawProductRecord>): 已 TRIM、空串标准化为 None 的批次，
    ///   行号为批次内 1 起始位置
    /// - Err(MissingRequiredColumns): 表头缺少必需列，错误信息列出全部缺失列
    /// - Err(CsvParseError): 字节流不可解析
    pub fn parse_reader<R: Read>(&self, reader: R) -> ImportResult<Vec<RawProductRecord>> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(reader);

        // 读取表头
        let headers: Vec<String> = csv_reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        // 必需列检查（在任何行级处理之前）
        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .filter(|col| !headers.iter().any(|h| h == *col))
            .copied()
            .collect();
        if !missing.is_empty() {
            return Err(ImportError::MissingRequiredColumns(missing.join(", ")));
        }

        // 定位各列下标（可选列允许缺失）
        let idx_of = |name: &str| headers.iter().position(|h| h == name);
        let product_no_idx = idx_of("product_no");
        let color_idx = idx_of("color");
        let group_code_idx = idx_of("group_code");
        let product_name_idx = idx_of("product_name");

        // 读取所有行
        let mut records = Vec::new();
        for result in csv_reader.records() {
            let row = result?;

            // 单元格取值: TRIM 后空串标准化为 None
            let cell = |idx: Option<usize>| -> Option<String> {
                idx.and_then(|i| row.get(i)).and_then(|v| {
                    let trimmed = v.trim();
                    if trimmed.is_empty() {
                        None
                    } else {
                        Some(trimmed.to_string())
                    }
                })
            };

            let record = RawProductRecord {
                product_no: cell(product_no_idx),
                color: cell(color_idx),
                group_code: cell(group_code_idx),
                product_name: cell(product_name_idx),
                row_number: 0, // 跳过空行后统一编号
            };

            // 跳过完全空白的行
            if record.product_no.is_none()
                && record.color.is_none()
                && record.group_code.is_none()
                && record.product_name.is_none()
            {
                continue;
            }

            records.push(record);
        }

        // 行号 = 批次内位置（1 起始）
        for (idx, record) in records.iter_mut().enumerate() {
            record.row_number = idx + 1;
        }

        Ok(records)
    }

    /// 从文件路径解析
    pub fn parse_path<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<Vec<RawProductRecord>> {
        let path = file_path.as_ref();

        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        // 检查扩展名
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        if ext != "csv" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let file = File::open(path)?;
        self.parse_reader(file)
    }
}
