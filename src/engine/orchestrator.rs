// ==========================================
// MSY 库存智能 - 对账与预测管道编排
// ==========================================
// 流程:
// 原始表 → 规范化 → 配料用量展开/汇总 → 供给关联 → 预测与分类 → 报表排序
// 红线:
// - 每个阶段为纯函数,不修改输入
// - 任一致命错误立即中止,不产出部分结果
// - 相同输入 → 相同输出（有序容器,行序确定）
// ==========================================

use crate::config::ForecastConfig;
use crate::domain::ledger::CombinedLedgerRow;
use crate::domain::sales::TopLineTotals;
use crate::engine::error::PipelineResult;
use crate::engine::forecaster::{sort_for_report, Forecaster};
use crate::engine::supply_joiner::SupplyJoiner;
use crate::engine::usage_expander::UsageExpander;
use crate::importer::file_parser::TableSource;
use crate::importer::ingredient_normalizer::IngredientMapNormalizer;
use crate::importer::normalizer_trait::TableNormalizer;
use crate::importer::raw_table::RawTables;
use crate::importer::sales_normalizer::SalesNormalizer;
use crate::importer::shipment_normalizer::ShipmentNormalizer;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{info, instrument};

// ==========================================
// NormalizationStats - 规范化统计
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizationStats {
    pub sales_rows: usize,
    pub sales_dropped_month: usize,       // 月份无法解析而丢弃
    pub mapping_rows: usize,
    pub mapping_dropped_empty: usize,     // Item Name / Ingredient 为空
    pub mapping_collapsed: usize,         // 重复 (Item, Ingredient) 合并
    pub shipment_rows: usize,
    pub shipment_dropped_empty: usize,    // Ingredient 为空
    pub shipment_merged: usize,           // 同一配料多行合并
}

// ==========================================
// PipelineReport - 管道输出
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineReport {
    /// 最终台账（已按 ReorderFlag → Ingredient → Month 排序）
    pub ledger: Vec<CombinedLedgerRow>,
    /// 顶层销售汇总（独立于配料展开）
    pub totals: TopLineTotals,
    pub stats: NormalizationStats,
}

impl PipelineReport {
    pub fn reorder_rows(&self) -> impl Iterator<Item = &CombinedLedgerRow> {
        self.ledger.iter().filter(|r| r.reorder_flag.needs_reorder())
    }
}

// ==========================================
// InventoryPipeline - 管道
// ==========================================
pub struct InventoryPipeline {
    forecaster: Forecaster,
}

impl InventoryPipeline {
    /// 创建管道（预测参数非法时立即失败,早于任何数据处理）
    pub fn new(forecast: &ForecastConfig) -> PipelineResult<Self> {
        Ok(Self {
            forecaster: Forecaster::new(forecast)?,
        })
    }

    /// 三张原始表 → 管道输出
    #[instrument(skip_all, fields(window = self.forecaster.window()))]
    pub fn run(&self, tables: &RawTables) -> PipelineResult<PipelineReport> {
        let started = Instant::now();

        // 1. 规范化（任一表结构错误即中止）
        let sales = SalesNormalizer.normalize(&tables.sales)?;
        let mappings = IngredientMapNormalizer.normalize(&tables.ingredients)?;
        let shipments = ShipmentNormalizer.normalize(&tables.shipments)?;

        // 2. 顶层销售汇总
        let totals = TopLineTotals::from_sales(&sales.records);

        // 3. 配料用量展开 + 月度汇总
        let monthly = UsageExpander.monthly_usage(&sales.records, &mappings.records);

        // 4. 供给预聚合 + 关联
        let supply = SupplyJoiner.aggregate_shipments(&shipments.records);
        let joined = SupplyJoiner.join(&monthly, &supply);

        // 5. 预测与分类 + 报表排序
        let mut ledger = self.forecaster.forecast(joined);
        sort_for_report(&mut ledger);

        let stats = NormalizationStats {
            sales_rows: sales.records.len(),
            sales_dropped_month: sales.dropped_rows,
            mapping_rows: mappings.records.len(),
            mapping_dropped_empty: mappings.dropped_rows,
            mapping_collapsed: mappings.collapsed_rows,
            shipment_rows: shipments.records.len(),
            shipment_dropped_empty: shipments.dropped_rows,
            shipment_merged: shipments.records.len() - supply.len(),
        };

        let report = PipelineReport {
            ledger,
            totals,
            stats,
        };

        info!(
            ledger_rows = report.ledger.len(),
            reorder_rows = report.reorder_rows().count(),
            total_sales = report.totals.total_sales,
            total_orders = report.totals.total_orders,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "对账与预测完成"
        );

        Ok(report)
    }

    /// 从数据源读取后运行（读取失败 → 数据源不可用,不进入清洗）
    pub fn run_source(&self, source: &dyn TableSource) -> PipelineResult<PipelineReport> {
        info!(source = %source.describe(), "读取数据源");
        let tables = source.load_tables()?;
        self.run(&tables)
    }
}

/// 便捷入口: 三张原始表 + 预测参数 → 管道输出
pub fn run_pipeline(tables: &RawTables, forecast: &ForecastConfig) -> PipelineResult<PipelineReport> {
    InventoryPipeline::new(forecast)?.run(tables)
}
