// ==========================================
// 产品主数据管理系统 - 领域层
// ==========================================
// 职责: 实体与导入流程中间类型，不含数据访问
// ==========================================

pub mod product;

pub use product::{
    derive_master_code, ExistingRecord, ImportOutcome, NewRecord, ProductMaster,
    RawProductRecord, CATALOG_COLUMNS,
};
