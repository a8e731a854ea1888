// ==========================================
// MSY 库存智能 - 核心库
// ==========================================
// 销售 / 配料映射 / 到货 → 月度配料台账 → 滑动平均预测 → 补货预警
// 系统定位: 决策支持（只读分析,不持久化）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 记录与类型
pub mod domain;

// 导入层 - 数据源读取与规范化
pub mod importer;

// 引擎层 - 对账、预测、导出
pub mod engine;

// 配置层 - 运行参数
pub mod config;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

pub use config::{ExportLayout, ForecastConfig, PipelineConfig};
pub use domain::{
    CombinedLedgerRow, Frequency, IngredientMapping, ReorderFlag, SalesRecord, ShipmentRecord,
    TableKind, TopLineTotals,
};
pub use engine::{
    run_pipeline, DashboardSummary, InventoryPipeline, LedgerExporter, PipelineError,
    PipelineReport, PipelineResult,
};
pub use importer::{CsvFileSource, ImportError, RawTable, RawTables, TableSource, WorkbookSource};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "MSY 库存智能";
