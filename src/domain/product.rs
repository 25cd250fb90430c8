// ==========================================
// 产品主数据管理系统 - 产品领域模型
// ==========================================
// 对齐: master_products 表
// 约束: master_code 永远由 product_no + color 派生，不接受用户输入
// ==========================================

use serde::{Deserialize, Serialize};

/// 目录视图的列集合（查询/导出共用，顺序即展示顺序）
pub const CATALOG_COLUMNS: [&str; 9] = [
    "master_code",
    "product_no",
    "color",
    "group_code",
    "product_name",
    "blf_code",
    "price_without_tax",
    "price_with_tax",
    "cost_price",
];

/// 派生主键: product_no + "_" + color
///
/// product_no / color 的合法字符集为 [A-Za-z0-9-]，
/// 下划线不可能出现在字段内部，因此派生键可无歧义还原。
pub fn derive_master_code(product_no: &str, color: &str) -> String {
    format!("{}_{}", product_no, color)
}

// ==========================================
// ProductMaster - 产品主数据
// ==========================================
// 用途: 导入层写入（前 5 列），目录视图只读展示（全 9 列）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductMaster {
    // ===== 主键（派生）=====
    pub master_code: String,

    // ===== 业务键 =====
    pub product_no: String, // 品号
    pub color: String,      // 颜色代码

    // ===== 基础信息 =====
    pub group_code: Option<String>,   // 产品分组代码
    pub product_name: Option<String>, // 品名

    // ===== 只读展示字段（由其他系统维护，导入不写入）=====
    pub blf_code: Option<String>,
    pub price_without_tax: Option<f64>, // 未税价
    pub price_with_tax: Option<f64>,    // 含税价
    pub cost_price: Option<f64>,        // 成本价
}

impl ProductMaster {
    /// 各列的文本形式（搜索/导出共用）
    ///
    /// 顺序与 CATALOG_COLUMNS 一致；空值为空字符串。
    pub fn text_fields(&self) -> [String; 9] {
        fn opt_s(v: &Option<String>) -> String {
            v.clone().unwrap_or_default()
        }
        fn opt_n(v: &Option<f64>) -> String {
            v.map(|n| n.to_string()).unwrap_or_default()
        }

        [
            self.master_code.clone(),
            self.product_no.clone(),
            self.color.clone(),
            opt_s(&self.group_code),
            opt_s(&self.product_name),
            opt_s(&self.blf_code),
            opt_n(&self.price_without_tax),
            opt_n(&self.price_with_tax),
            opt_n(&self.cost_price),
        ]
    }
}

// ==========================================
// RawProductRecord - 导入中间结构体
// ==========================================
// 用途: 导入管道中间产物（文件解析 → 校验 → 存量比对 → 落库）
// 生命周期: 仅在单次导入流程内，结束后即丢弃
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawProductRecord {
    // 源字段（已 TRIM，空串标准化为 None）
    pub product_no: Option<String>,
    pub color: Option<String>,
    pub group_code: Option<String>,
    pub product_name: Option<String>,

    // 行号（1 起始，对应批次内位置，用于用户侧报告）
    pub row_number: usize,
}

// ==========================================
// 存量比对结果
// ==========================================

/// 已存在记录: 派生键已在库中，跳过并报告
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExistingRecord {
    pub row_number: usize,
    pub master_code: String,
    pub product_no: String,
    pub color: String,
}

/// 新增记录: 派生键不在库中，进入落库阶段
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRecord {
    pub row_number: usize,
    pub master_code: String,
    pub product_no: String,
    pub color: String,
    pub group_code: Option<String>,
    pub product_name: Option<String>,
}

// ==========================================
// ImportOutcome - 单次导入结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportOutcome {
    /// 批次 ID（仅用于日志与响应追溯，不落库）
    pub batch_id: String,
    /// 本次新增落库的记录数
    pub imported: usize,
    /// 因已存在而跳过的记录（按批次内行序）
    pub skipped: Vec<ExistingRecord>,
    /// 导入耗时（毫秒）
    pub elapsed_ms: i64,
}
