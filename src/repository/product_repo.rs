// ==========================================
// 产品主数据管理系统 - 产品主数据仓储
// ==========================================
// 职责: 管理 master_products 表的读取与写入
// 红线: 不含业务逻辑，只负责数据访问
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::product::{NewRecord, ProductMaster};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension, Transaction};
use std::sync::{Arc, Mutex};

// ==========================================
// ProductMasterRepository - 产品主数据仓储
// ==========================================
pub struct ProductMasterRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ProductMasterRepository {
    /// 创建新的 ProductMasterRepository 实例
    ///
    /// 打开一条专属连接；实例随作用域销毁时连接随之释放，
    /// 即“每个操作一条连接”的作用域获取模式。
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例（测试/共享连接场景）
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 读取全部目录记录
    ///
    /// # 返回
    /// - Ok(Vec<ProductMaster>): 按插入顺序（rowid）排序的全量目录
    /// - Err: 数据库错误
    pub fn fetch_all(&self) -> RepositoryResult<Vec<ProductMaster>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT
                master_code, product_no, color, group_code,
                product_name, blf_code, price_without_tax,
                price_with_tax, cost_price
            FROM master_products
            ORDER BY rowid
            "#,
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(ProductMaster {
                master_code: row.get(0)?,
                product_no: row.get(1)?,
                color: row.get(2)?,
                group_code: row.get(3)?,
                product_name: row.get(4)?,
                blf_code: row.get(5)?,
                price_without_tax: row.get(6)?,
                price_with_tax: row.get(7)?,
                cost_price: row.get(8)?,
            })
        })?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    /// 按派生主键探测记录是否存在
    ///
    /// # 参数
    /// - master_code: 派生主键
    ///
    /// # 返回
    /// - Ok(true): 记录已存在
    /// - Ok(false): 记录不存在
    pub fn exists(&self, master_code: &str) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let found: Option<i64> = conn
            .query_row(
                "SELECT 1 FROM master_products WHERE master_code = ?1",
                params![master_code],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    /// 事务化批量插入新增记录
    ///
    /// # 参数
    /// - records: 新增记录列表（携带批次内行号）
    ///
    /// # 返回
    /// - Ok(usize): 成功插入的记录数
    /// - Err(InsertFailed): 任一行失败时整批回滚，错误携带该行行号与原因
    ///
    /// # 说明
    /// - 单事务执行，要么全部提交，要么全部回滚
    /// - 事务未提交即销毁时由 rusqlite 自动回滚
    pub fn insert_batch(&self, records: &[NewRecord]) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;

        let mut count = 0;
        for record in records {
            Self::insert_one(&tx, record).map_err(|e| RepositoryError::InsertFailed {
                row: record.row_number,
                message: e.to_string(),
            })?;
            count += 1;
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        Ok(count)
    }

    /// 单行插入（仅写导入列；价格等展示列不在导入范围内）
    fn insert_one(tx: &Transaction<'_>, record: &NewRecord) -> rusqlite::Result<()> {
        tx.execute(
            r#"
            INSERT INTO master_products
                (master_code, product_no, color, group_code, product_name)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                record.master_code,
                record.product_no,
                record.color,
                record.group_code,
                record.product_name,
            ],
        )?;
        Ok(())
    }
}
