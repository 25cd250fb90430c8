// ==========================================
// 产品主数据管理系统 - Excel 导出器
// ==========================================
// 职责: 当前筛选/排序视图 → 单工作表 .xlsx 字节流
// 说明: 全列导出（与目录视图列集合一致），按需生成，不落盘
// ==========================================

use crate::domain::product::{ProductMaster, CATALOG_COLUMNS};
use rust_xlsxwriter::{Workbook, XlsxError};
use thiserror::Error;

/// 导出工作表名
const SHEET_NAME: &str = "Master Sheet";

/// 导出层错误类型
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Excel 生成失败: {0}")]
    WorkbookError(String),
}

impl From<XlsxError> for ExportError {
    fn from(err: XlsxError) -> Self {
        ExportError::WorkbookError(err.to_string())
    }
}

pub struct SheetExporter;

impl SheetExporter {
    /// 生成目录视图的 Excel 字节流
    ///
    /// # 参数
    /// - records: 已筛选/排序的目录记录（全部行，不分页）
    ///
    /// # 返回
    /// - Ok(Vec<u8>): .xlsx 文件内容
    pub fn write_catalog(&self, records: &[ProductMaster]) -> Result<Vec<u8>, ExportError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(SHEET_NAME)?;

        // 表头行
        for (col, name) in CATALOG_COLUMNS.iter().enumerate() {
            worksheet.write_string(0, col as u16, *name)?;
        }

        // 数据行: 文本列写字符串，价格列写数值，空值留空
        for (idx, record) in records.iter().enumerate() {
            let row = (idx + 1) as u32;

            worksheet.write_string(row, 0, record.master_code.as_str())?;
            worksheet.write_string(row, 1, record.product_no.as_str())?;
            worksheet.write_string(row, 2, record.color.as_str())?;

            if let Some(v) = &record.group_code {
                worksheet.write_string(row, 3, v.as_str())?;
            }
            if let Some(v) = &record.product_name {
                worksheet.write_string(row, 4, v.as_str())?;
            }
            if let Some(v) = &record.blf_code {
                worksheet.write_string(row, 5, v.as_str())?;
            }
            if let Some(v) = record.price_without_tax {
                worksheet.write_number(row, 6, v)?;
            }
            if let Some(v) = record.price_with_tax {
                worksheet.write_number(row, 7, v)?;
            }
            if let Some(v) = record.cost_price {
                worksheet.write_number(row, 8, v)?;
            }
        }

        let buffer = workbook.save_to_buffer()?;
        Ok(buffer)
    }
}
