// ==========================================
// 产品主数据管理系统 - 目录 API
// ==========================================
// 职责: 目录视图查询（搜索/排序/分页）与导出
// 说明: 目录规模为内部主数据量级，全量读取后在内存中
//       完成筛选排序，与存储层的自然顺序（插入序）解耦
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::product::ProductMaster;
use crate::exporter::SheetExporter;
use crate::repository::ProductMasterRepository;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

/// 允许的每页行数集合（与页面选择器一致）
const ALLOWED_PAGE_SIZES: [usize; 4] = [10, 25, 50, 100];

/// 默认每页行数
const DEFAULT_PAGE_SIZE: usize = 25;

// ==========================================
// CatalogQuery - 目录查询参数
// ==========================================
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogQuery {
    /// 任意列的大小写不敏感子串搜索
    pub search: Option<String>,
    /// 排序列名（默认 master_code）
    pub sort_by: Option<String>,
    /// 排序方向: "asc"（默认）或 "desc"
    pub order: Option<String>,
    /// 页码（1 起始）
    pub page: Option<usize>,
    /// 每页行数（限定 10/25/50/100，非法值回退默认）
    pub page_size: Option<usize>,
}

impl CatalogQuery {
    fn descending(&self) -> bool {
        matches!(self.order.as_deref(), Some("desc"))
    }

    fn effective_page_size(&self) -> usize {
        match self.page_size {
            Some(size) if ALLOWED_PAGE_SIZES.contains(&size) => size,
            _ => DEFAULT_PAGE_SIZE,
        }
    }

    fn effective_page(&self) -> usize {
        self.page.unwrap_or(1).max(1)
    }
}

// ==========================================
// CatalogPage - 目录分页响应
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogPage {
    /// 当前页记录
    pub records: Vec<ProductMaster>,
    /// 筛选后的总行数
    pub total_records: usize,
    /// 总页数
    pub total_pages: usize,
    /// 当前页码（1 起始）
    pub page: usize,
    /// 每页行数
    pub page_size: usize,
}

// ==========================================
// CatalogApi - 目录 API
// ==========================================
pub struct CatalogApi {
    db_path: String,
}

impl CatalogApi {
    /// 创建新的 CatalogApi 实例
    pub fn new(db_path: String) -> Self {
        Self { db_path }
    }

    /// 查询目录视图（搜索 → 排序 → 分页）
    ///
    /// # 返回
    /// - Ok(CatalogPage): 当前页记录与分页信息
    /// - Err(InvalidInput): 未知排序列
    /// - Err(DatabaseError): 目录读取失败
    pub fn query(&self, query: &CatalogQuery) -> ApiResult<CatalogPage> {
        let records = self.filtered_sorted(query)?;

        let total_records = records.len();
        let page_size = query.effective_page_size();
        let total_pages = total_records.div_ceil(page_size);
        let page = query.effective_page();

        let start = (page - 1).saturating_mul(page_size);
        let page_records: Vec<ProductMaster> = if start >= total_records {
            Vec::new()
        } else {
            records[start..(start + page_size).min(total_records)].to_vec()
        };

        debug!(
            total = total_records,
            page = page,
            page_size = page_size,
            "目录查询完成"
        );

        Ok(CatalogPage {
            records: page_records,
            total_records,
            total_pages,
            page,
            page_size,
        })
    }

    /// 导出当前筛选/排序视图（全部行）为 Excel 字节流
    pub fn export(&self, query: &CatalogQuery) -> ApiResult<Vec<u8>> {
        let records = self.filtered_sorted(query)?;
        let buffer = SheetExporter.write_catalog(&records)?;
        Ok(buffer)
    }

    /// 读取并应用搜索与排序（分页之前的公共部分）
    fn filtered_sorted(&self, query: &CatalogQuery) -> ApiResult<Vec<ProductMaster>> {
        let repo = ProductMasterRepository::new(&self.db_path)?;
        let mut records = repo.fetch_all()?;

        if let Some(needle) = query.search.as_deref() {
            let needle = needle.trim().to_lowercase();
            if !needle.is_empty() {
                records.retain(|r| {
                    r.text_fields()
                        .iter()
                        .any(|field| field.to_lowercase().contains(&needle))
                });
            }
        }

        let sort_by = query.sort_by.as_deref().unwrap_or("master_code");
        sort_records(&mut records, sort_by, query.descending())?;

        Ok(records)
    }
}

/// 按列名排序
///
/// 文本列按字典序，价格列按数值；空值恒排末尾（与方向无关）。
/// 未知列名返回 InvalidInput。
pub(crate) fn sort_records(
    records: &mut [ProductMaster],
    column: &str,
    descending: bool,
) -> ApiResult<()> {
    // 非空文本列的方向化比较
    let cmp_text = |a: &str, b: &str| -> Ordering {
        if descending {
            b.cmp(a)
        } else {
            a.cmp(b)
        }
    };

    // 可空列: 空值恒排末尾，其余按方向比较
    fn cmp_opt<T, F>(a: &Option<T>, b: &Option<T>, descending: bool, cmp: F) -> Ordering
    where
        F: Fn(&T, &T) -> Ordering,
    {
        match (a, b) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(x), Some(y)) => {
                if descending {
                    cmp(y, x)
                } else {
                    cmp(x, y)
                }
            }
        }
    }

    let cmp_f64 = |a: &f64, b: &f64| a.partial_cmp(b).unwrap_or(Ordering::Equal);

    match column {
        "master_code" => records.sort_by(|a, b| cmp_text(&a.master_code, &b.master_code)),
        "product_no" => records.sort_by(|a, b| cmp_text(&a.product_no, &b.product_no)),
        "color" => records.sort_by(|a, b| cmp_text(&a.color, &b.color)),
        "group_code" => records
            .sort_by(|a, b| cmp_opt(&a.group_code, &b.group_code, descending, |x, y| x.cmp(y))),
        "product_name" => records.sort_by(|a, b| {
            cmp_opt(&a.product_name, &b.product_name, descending, |x, y| x.cmp(y))
        }),
        "blf_code" => {
            records.sort_by(|a, b| cmp_opt(&a.blf_code, &b.blf_code, descending, |x, y| x.cmp(y)))
        }
        "price_without_tax" => records.sort_by(|a, b| {
            cmp_opt(&a.price_without_tax, &b.price_without_tax, descending, cmp_f64)
        }),
        "price_with_tax" => records
            .sort_by(|a, b| cmp_opt(&a.price_with_tax, &b.price_with_tax, descending, cmp_f64)),
        "cost_price" => {
            records.sort_by(|a, b| cmp_opt(&a.cost_price, &b.cost_price, descending, cmp_f64))
        }
        other => {
            return Err(ApiError::InvalidInput(format!("未知排序列: {}", other)));
        }
    }

    Ok(())
}
