// ==========================================
// MSY 库存智能 - 引擎层
// ==========================================
// 职责: 用量展开 → 供给关联 → 预测与补货分类 → 导出 / 驾驶舱
// 红线: 各阶段为纯函数,相同输入产出相同输出
// ==========================================

pub mod dashboard;
pub mod error;
pub mod export;
pub mod forecaster;
pub mod orchestrator;
pub mod supply_joiner;
pub mod usage_expander;

// 重导出核心引擎
pub use dashboard::{DashboardKpis, DashboardSummary, IngredientBalance, MonthlyTrendPoint};
pub use error::{PipelineError, PipelineResult};
pub use export::LedgerExporter;
pub use forecaster::{sort_for_report, Forecaster};
pub use orchestrator::{run_pipeline, InventoryPipeline, NormalizationStats, PipelineReport};
pub use supply_joiner::SupplyJoiner;
pub use usage_expander::UsageExpander;
