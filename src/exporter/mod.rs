// ==========================================
// 产品主数据管理系统 - 导出层
// ==========================================
// 职责: 将目录视图生成为单工作表 Excel 文件
// ==========================================

pub mod sheet_writer;

pub use sheet_writer::{ExportError, SheetExporter};
