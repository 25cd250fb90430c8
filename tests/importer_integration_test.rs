// ==========================================
// ProductImporter 集成测试
// ==========================================
// 测试目标: 验证完整的导入流程（校验 → 存量比对 → 事务化落库）
// ==========================================

mod test_helpers;

use master_sheet::domain::product::RawProductRecord;
use master_sheet::importer::{ImportError, ProductImporter, ProductImporterImpl};
use master_sheet::logging;
use master_sheet::repository::ProductMasterRepository;
use std::io::Write;
use tempfile::NamedTempFile;
use test_helpers::{count_products, create_test_db};

fn record(product_no: &str, color: &str, row_number: usize) -> RawProductRecord {
    RawProductRecord {
        product_no: Some(product_no.to_string()),
        color: Some(color.to_string()),
        group_code: None,
        product_name: None,
        row_number,
    }
}

#[tokio::test]
async fn test_import_single_record() {
    logging::init_test();
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");

    let importer = ProductImporterImpl::new(&db_path).expect("Failed to create importer");
    let outcome = importer
        .import_records(vec![record("B2", "BLU", 1)])
        .await
        .expect("Import should succeed");

    assert_eq!(outcome.imported, 1);
    assert!(outcome.skipped.is_empty());

    // fetch_all 应包含派生主键
    let repo = ProductMasterRepository::new(&db_path).unwrap();
    let records = repo.fetch_all().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].master_code, "B2_BLU");
    assert_eq!(records[0].product_no, "B2");
}

#[tokio::test]
async fn test_import_is_idempotent() {
    logging::init_test();
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");

    let importer = ProductImporterImpl::new(&db_path).expect("Failed to create importer");
    let batch = vec![record("B2", "BLU", 1), record("A1", "RED", 2)];

    let first = importer.import_records(batch.clone()).await.unwrap();
    assert_eq!(first.imported, 2);

    // 第二次导入同一批次: 全部归入已存在，0 新增
    let second = importer.import_records(batch).await.unwrap();
    assert_eq!(second.imported, 0);
    assert_eq!(second.skipped.len(), 2);
    assert_eq!(second.skipped[0].row_number, 1);
    assert_eq!(second.skipped[0].master_code, "B2_BLU");

    assert_eq!(count_products(&db_path), 2);
}

#[tokio::test]
async fn test_import_against_existing_store() {
    logging::init_test();
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");

    // 预置 B2_BLU
    let importer = ProductImporterImpl::new(&db_path).expect("Failed to create importer");
    importer
        .import_records(vec![record("B2", "BLU", 1)])
        .await
        .unwrap();

    // 同键批次 → 0 新增，跳过明细携带行号与派生键
    let outcome = importer
        .import_records(vec![record("B2", "BLU", 1)])
        .await
        .unwrap();
    assert_eq!(outcome.imported, 0);
    assert_eq!(outcome.skipped.len(), 1);
    assert_eq!(outcome.skipped[0].master_code, "B2_BLU");
}

#[tokio::test]
async fn test_validation_failure_makes_no_mutation() {
    logging::init_test();
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");

    let importer = ProductImporterImpl::new(&db_path).expect("Failed to create importer");

    // 批次内重复组合 → 整批拒绝
    let result = importer
        .import_records(vec![record("A1", "RED", 1), record("A1", "RED", 2)])
        .await;

    match result {
        Err(ImportError::ValidationFailed(msg)) => {
            assert!(msg.contains("A1/RED"));
        }
        other => panic!("expected ValidationFailed, got {:?}", other.map(|_| ())),
    }

    assert_eq!(count_products(&db_path), 0);
}

#[tokio::test]
async fn test_validation_missing_field_makes_no_mutation() {
    logging::init_test();
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");

    let importer = ProductImporterImpl::new(&db_path).expect("Failed to create importer");
    let batch = vec![RawProductRecord {
        product_no: Some("B2".to_string()),
        color: None,
        group_code: None,
        product_name: None,
        row_number: 1,
    }];

    let result = importer.import_records(batch).await;
    assert!(matches!(result, Err(ImportError::ValidationFailed(_))));
    assert_eq!(count_products(&db_path), 0);
}

#[tokio::test]
async fn test_import_from_csv_file() {
    logging::init_test();
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");

    let mut csv_file = NamedTempFile::with_suffix(".csv").unwrap();
    writeln!(csv_file, "product_no,color,group_code,product_name").unwrap();
    writeln!(csv_file, "B2,BLU,G1,Blue sample").unwrap();
    writeln!(csv_file, "A1,RED,,").unwrap();

    let importer = ProductImporterImpl::new(&db_path).expect("Failed to create importer");
    let outcome = importer.import_from_csv(csv_file.path()).await.unwrap();

    assert_eq!(outcome.imported, 2);

    let repo = ProductMasterRepository::new(&db_path).unwrap();
    let records = repo.fetch_all().unwrap();
    assert_eq!(records[0].product_name.as_deref(), Some("Blue sample"));
    // 空可选列落库为 NULL
    assert!(records[1].group_code.is_none());
}

#[tokio::test]
async fn test_import_from_csv_missing_color_column() {
    logging::init_test();
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");

    let mut csv_file = NamedTempFile::with_suffix(".csv").unwrap();
    writeln!(csv_file, "product_no,group_code").unwrap();
    writeln!(csv_file, "B2,G1").unwrap();

    let importer = ProductImporterImpl::new(&db_path).expect("Failed to create importer");
    let result = importer.import_from_csv(csv_file.path()).await;

    // 缺列在校验之前即拒绝，错误信息点名缺失列
    match result {
        Err(ImportError::MissingRequiredColumns(cols)) => assert!(cols.contains("color")),
        other => panic!("expected MissingRequiredColumns, got {:?}", other.map(|_| ())),
    }
    assert_eq!(count_products(&db_path), 0);
}
