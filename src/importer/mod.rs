// ==========================================
// MSY 库存智能 - 导入层
// ==========================================
// 职责: 读取数据源 + 三张表的列名/类型规范化
// 支持: Excel 工作簿, CSV
// ==========================================

// 模块声明
pub mod data_cleaner;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod ingredient_normalizer;
pub mod normalizer_trait;
pub mod raw_table;
pub mod sales_normalizer;
pub mod shipment_normalizer;

// 重导出核心类型
pub use data_cleaner::DataCleaner;
pub use error::{ImportError, ImportResult};
pub use field_mapper::{ColumnSpec, FieldMapper};
pub use file_parser::{CsvFileSource, CsvParser, ExcelParser, TableSource, WorkbookSource};
pub use ingredient_normalizer::IngredientMapNormalizer;
pub use normalizer_trait::{Normalized, TableNormalizer};
pub use raw_table::{RawTable, RawTables};
pub use sales_normalizer::SalesNormalizer;
pub use shipment_normalizer::ShipmentNormalizer;
