// ==========================================
// MSY 库存智能 - 领域模型层
// ==========================================
// 职责: 定义规范化记录、台账行、领域类型
// 红线: 不含 I/O,不含引擎逻辑
// ==========================================

pub mod ingredient;
pub mod ledger;
pub mod sales;
pub mod shipment;
pub mod types;

// 重导出核心类型
pub use ingredient::IngredientMapping;
pub use ledger::{CombinedLedgerRow, JoinedUsageRow, MonthlyIngredientUsage, UsageRow};
pub use sales::{SalesRecord, TopLineTotals};
pub use shipment::{ShipmentRecord, ShipmentSupply};
pub use types::{Frequency, ReorderFlag, TableKind};
