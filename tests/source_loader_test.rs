// ==========================================
// 数据源读取集成测试
// ==========================================
// 测试目标: 读取失败一律归类为"数据源不可用",且发生在清洗之前
// ==========================================


use msy_inventory::config::{ForecastConfig, SourceConfig};
use msy_inventory::engine::InventoryPipeline;
use msy_inventory::importer::{CsvFileSource, ImportError, TableSource, WorkbookSource};
use test_helpers::{create_default_fixture, fixture_path, write_file};

fn workbook_source(name: &str) -> WorkbookSource {
    WorkbookSource::from(&SourceConfig {
        workbook_path: fixture_path(name),
        ..SourceConfig::default()
    })
}

#[test]
fn test_csv_source_loads_three_tables() {
    let fixture = create_default_fixture().unwrap();
    let tables = fixture.source().load_tables().unwrap();

    assert_eq!(tables.sales.headers, vec!["Month", "Item Name", "Count", "Amount"]);
    assert_eq!(tables.sales.row_count(), 6);
    assert_eq!(tables.ingredients.row_count(), 5);
    assert_eq!(tables.shipments.row_count(), 3);
}

#[test]
fn test_csv_blank_rows_skipped_and_cells_trimmed() {
    let dir = tempfile::tempdir().unwrap();
    let sales = write_file(
        dir.path(),
        "sales.csv",
        "Month , Item Name ,Count\n2025-01-01,  Beef Noodle ,3\n,,\n\n",
    )
    .unwrap();
    let fixture = create_default_fixture().unwrap();
    let source = CsvFileSource {
        sales,
        ..fixture.source()
    };

    let tables = source.load_tables().unwrap();
    assert_eq!(tables.sales.headers, vec!["Month", "Item Name", "Count"]);
    assert_eq!(tables.sales.row_count(), 1);
    assert_eq!(tables.sales.rows[0][1], "Beef Noodle");
}

#[test]
fn test_missing_csv_is_source_unavailable() {
    let fixture = create_default_fixture().unwrap();
    let source = CsvFileSource {
        shipments: fixture.output_path("missing.csv"),
        ..fixture.source()
    };

    let err = source.load_tables().unwrap_err();
    assert!(matches!(err, ImportError::FileNotFound(_)));
    assert!(err.is_source_unavailable());
    assert!(!err.is_schema_error());
}

#[test]
fn test_unsupported_extension_is_source_unavailable() {
    let fixture = create_default_fixture().unwrap();
    let txt = write_file(fixture.dir.path(), "sales.txt", "Month,Item Name,Count\n").unwrap();
    let source = CsvFileSource {
        sales: txt,
        ..fixture.source()
    };

    let err = source.load_tables().unwrap_err();
    assert!(matches!(err, ImportError::UnsupportedFormat(_)));
    assert!(err.is_source_unavailable());
}

#[test]
fn test_missing_workbook_is_source_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let config = SourceConfig {
        workbook_path: dir.path().join("Restaurant Data.xlsx"),
        ..SourceConfig::default()
    };

    let err = WorkbookSource::from(&config).load_tables().unwrap_err();
    assert!(matches!(err, ImportError::FileNotFound(_)));
    assert!(err.is_source_unavailable());
}

#[test]
fn test_corrupt_workbook_is_source_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "Restaurant Data.xlsx", "not a zip archive").unwrap();
    let config = SourceConfig {
        workbook_path: path,
        ..SourceConfig::default()
    };

    let err = WorkbookSource::from(&config).load_tables().unwrap_err();
    assert!(matches!(err, ImportError::WorkbookOpen { .. }));
    assert!(err.is_source_unavailable());
}

#[test]
fn test_workbook_with_csv_extension_rejected() {
    let fixture = create_default_fixture().unwrap();
    let config = SourceConfig {
        workbook_path: fixture.sales.clone(),
        ..SourceConfig::default()
    };

    let err = WorkbookSource::from(&config).load_tables().unwrap_err();
    assert!(matches!(err, ImportError::UnsupportedFormat(_)));
}

#[test]
fn test_pipeline_surfaces_source_error() {
    let dir = tempfile::tempdir().unwrap();
    let source = CsvFileSource {
        sales: dir.path().join("a.csv"),
        ingredients: dir.path().join("b.csv"),
        shipments: dir.path().join("c.csv"),
    };

    let err = InventoryPipeline::new(&ForecastConfig::default())
        .unwrap()
        .run_source(&source)
        .unwrap_err();
    assert!(err.is_source_unavailable());
    assert!(!err.is_schema_error());
}

#[test]
fn test_source_describe_names_paths() {
    let config = SourceConfig::default();
    let description = WorkbookSource::from(&config).describe();
    assert!(description.contains("Restaurant Data.xlsx"));
    assert!(description.contains("CSVIngrediant"));
}

#[test]
fn test_workbook_loads_three_sheets() {
    let tables = workbook_source("restaurant_data.xlsx").load_tables().unwrap();

    assert_eq!(tables.sales.headers, vec!["Month", "Item Name", "Count", "Amount"]);
    assert_eq!(tables.sales.row_count(), 6);
    assert_eq!(tables.ingredients.row_count(), 5);
    assert_eq!(tables.shipments.row_count(), 3);

    // 日期单元格转为 YYYY-MM-DD 文本
    assert_eq!(tables.sales.rows[0][0], "2025-01-15");
    assert_eq!(tables.sales.rows[0][1], "Beef Noodle");
}

#[test]
fn test_workbook_1904_date_system() {
    let tables = workbook_source("restaurant_data_1904.xlsx").load_tables().unwrap();
    let months: Vec<&str> = tables.sales.rows.iter().map(|r| r[0].as_str()).collect();
    assert_eq!(
        months,
        vec!["2025-01-15", "2025-02-15", "2025-03-15", "2025-01-20", "2025-02-20", "2025-01-05"]
    );
}

#[test]
fn test_workbook_ledger_matches_csv_ledger() {
    let pipeline = InventoryPipeline::new(&ForecastConfig::default()).unwrap();
    let fixture = create_default_fixture().unwrap();
    let from_csv = pipeline.run_source(&fixture.source()).unwrap();
    let from_1900 = pipeline
        .run_source(&workbook_source("restaurant_data.xlsx"))
        .unwrap();
    let from_1904 = pipeline
        .run_source(&workbook_source("restaurant_data_1904.xlsx"))
        .unwrap();

    assert_eq!(from_1900.totals.total_sales, 2000.0);
    assert_eq!(from_1900.totals.total_orders, 78.0);
    assert_eq!(from_1900.ledger, from_csv.ledger);
    assert_eq!(from_1904.ledger, from_1900.ledger);
}

#[test]
fn test_missing_sheet_is_source_unavailable() {
    let source = WorkbookSource::from(&SourceConfig {
        workbook_path: fixture_path("restaurant_data.xlsx"),
        shipment_sheet: "Shipments".to_string(),
        ..SourceConfig::default()
    });

    let err = source.load_tables().unwrap_err();
    match &err {
        ImportError::SheetNotFound { sheet, available } => {
            assert_eq!(sheet, "Shipments");
            assert_eq!(
                available,
                &vec![
                    "Restaurant Data".to_string(),
                    "CSVIngrediant".to_string(),
                    "CSVShipment".to_string(),
                ]
            );
        }
        other => panic!("期望 SheetNotFound, 实际: {other:?}"),
    }
    assert!(err.is_source_unavailable());
}
