// ==========================================
// MSY 库存智能 - 驾驶舱汇总
// ==========================================
// 职责: 由台账与顶层汇总派生 KPI / 图表数据
// - KPI: 总销售额 / 总订单数 / 跟踪配料数
// - 到货 vs 用量（每个配料）+ 使用率
// - 月度用量趋势
// 红线: 只读台账,不参与补货分类
// ==========================================

use crate::domain::ledger::CombinedLedgerRow;
use crate::domain::sales::TopLineTotals;
use crate::engine::orchestrator::PipelineReport;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DashboardKpis {
    pub total_sales: f64,
    pub total_orders: f64,
    pub ingredients_tracked: usize,
}

/// 单个配料的到货与用量对比
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientBalance {
    pub ingredient: String,
    /// 全部月份用量之和
    pub used: f64,
    /// 到货量（各月广播值相同,取最大值）；无到货记录为 None
    pub received: Option<f64>,
    /// used / received × 100；到货缺失或为 0 时为 None
    pub usage_rate_pct: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTrendPoint {
    pub month: NaiveDate,
    pub total_used: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub kpis: DashboardKpis,
    /// 按配料名升序
    pub received_vs_used: Vec<IngredientBalance>,
    /// 按月份升序
    pub trend: Vec<MonthlyTrendPoint>,
}

impl DashboardSummary {
    pub fn from_report(report: &PipelineReport) -> Self {
        Self::build(&report.ledger, &report.totals)
    }

    pub fn build(ledger: &[CombinedLedgerRow], totals: &TopLineTotals) -> Self {
        let ingredients: BTreeSet<&str> = ledger.iter().map(|r| r.ingredient.as_str()).collect();

        let mut balances: BTreeMap<&str, (f64, Option<f64>)> = BTreeMap::new();
        let mut trend: BTreeMap<NaiveDate, f64> = BTreeMap::new();

        for row in ledger {
            let entry = balances.entry(row.ingredient.as_str()).or_insert((0.0, None));
            entry.0 += row.total_used;
            entry.1 = match (entry.1, row.total_received) {
                (Some(a), Some(b)) => Some(a.max(b)),
                (a, b) => a.or(b),
            };

            *trend.entry(row.month).or_insert(0.0) += row.total_used;
        }

        let received_vs_used = balances
            .into_iter()
            .map(|(ingredient, (used, received))| IngredientBalance {
                ingredient: ingredient.to_string(),
                used,
                received,
                usage_rate_pct: received
                    .filter(|r| *r > 0.0)
                    .map(|r| used / r * 100.0),
            })
            .collect();

        Self {
            kpis: DashboardKpis {
                total_sales: totals.total_sales,
                total_orders: totals.total_orders,
                ingredients_tracked: ingredients.len(),
            },
            received_vs_used,
            trend: trend
                .into_iter()
                .map(|(month, total_used)| MonthlyTrendPoint { month, total_used })
                .collect(),
        }
    }

    /// 按使用率降序（无使用率的配料排最后,同值按配料名）
    pub fn by_usage_rate(&self) -> Vec<&IngredientBalance> {
        let mut sorted: Vec<&IngredientBalance> = self.received_vs_used.iter().collect();
        sorted.sort_by(|a, b| match (a.usage_rate_pct, b.usage_rate_pct) {
            (Some(x), Some(y)) => y.total_cmp(&x).then_with(|| a.ingredient.cmp(&b.ingredient)),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.ingredient.cmp(&b.ingredient),
        });
        sorted
    }
}
