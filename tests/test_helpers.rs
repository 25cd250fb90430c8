// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供测试所需的数据库初始化、测试数据生成等功能
// ==========================================

use master_sheet::db::{init_schema, open_sqlite_connection};
use rusqlite::{params, Connection};
use std::error::Error;
use tempfile::NamedTempFile;

/// 创建临时测试数据库并初始化 schema
///
/// # 返回
/// - NamedTempFile: 临时数据库文件（需要保持存活）
/// - String: 数据库文件路径
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file.path().to_str().unwrap().to_string();

    let conn = open_sqlite_connection(&db_path)?;
    init_schema(&conn)?;

    Ok((temp_file, db_path))
}

/// 向目录插入一条完整记录（含只读展示列，模拟其他系统维护的数据）
pub fn seed_product(
    conn: &Connection,
    product_no: &str,
    color: &str,
    product_name: Option<&str>,
    price_without_tax: Option<f64>,
) -> Result<(), Box<dyn Error>> {
    conn.execute(
        r#"
        INSERT INTO master_products
            (master_code, product_no, color, group_code, product_name,
             blf_code, price_without_tax, price_with_tax, cost_price)
        VALUES (?1, ?2, ?3, NULL, ?4, NULL, ?5, NULL, NULL)
        "#,
        params![
            format!("{}_{}", product_no, color),
            product_no,
            color,
            product_name,
            price_without_tax,
        ],
    )?;
    Ok(())
}

/// 统计目录总行数
pub fn count_products(db_path: &str) -> i64 {
    let conn = open_sqlite_connection(db_path).expect("open db");
    conn.query_row("SELECT COUNT(*) FROM master_products", [], |row| row.get(0))
        .expect("count rows")
}
