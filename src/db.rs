// ==========================================
// 产品主数据管理系统 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为
// - 统一 busy_timeout，减少并发写入时的偶发 busy 错误
// - 建表幂等，首次启动自动初始化 master_products
// ==========================================

use rusqlite::Connection;
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - foreign_keys 需要“每个连接”单独开启
/// - busy_timeout 需要“每个连接”单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 初始化 master_products 表（幂等）
///
/// 说明：
/// - master_code 为派生主键（product_no + "_" + color），
///   PRIMARY KEY 同时充当并发重复导入的存储层兜底约束
/// - blf_code / 价格字段由其他系统维护，导入流程不写入
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS master_products (
            master_code        TEXT PRIMARY KEY,
            product_no         TEXT NOT NULL,
            color              TEXT NOT NULL,
            group_code         TEXT,
            product_name       TEXT,
            blf_code           TEXT,
            price_without_tax  REAL,
            price_with_tax     REAL,
            cost_price         REAL
        )
        "#,
        [],
    )?;
    Ok(())
}

/// 打开数据库并确保 schema 就绪（进程启动时调用一次）
pub fn init_database(db_path: &str) -> rusqlite::Result<()> {
    let conn = open_sqlite_connection(db_path)?;
    init_schema(&conn)?;
    Ok(())
}
