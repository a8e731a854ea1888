// ==========================================
// MSY 库存智能 - 预测与补货分类引擎
// ==========================================
// 职责:
// 1. 每个配料按月份升序,计算 TotalUsed 的尾随滑动平均（当前 + 前 N-1 期）
// 2. gap = total_used − total_received（缺失按 0）
// 3. forecast > total_received → "Reorder Soon",否则 "OK"（严格大于,相等为 OK）
// 4. 到货表中不存在的配料 → 始终 "Reorder Soon"
// 说明: 滑动平均只是平滑器,不是预测模型,天然滞后于实际需求
//       窗口按该配料的台账行计数,不按日历月补齐空缺月份
// ==========================================

use crate::config::ForecastConfig;
use crate::domain::ledger::{CombinedLedgerRow, JoinedUsageRow};
use crate::domain::types::ReorderFlag;
use crate::engine::error::{PipelineError, PipelineResult};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

pub struct Forecaster {
    window: usize,
}

impl Forecaster {
    /// 创建预测引擎,窗口必须 ≥ 1
    pub fn new(config: &ForecastConfig) -> PipelineResult<Self> {
        if config.window == 0 {
            return Err(PipelineError::InvalidConfig(
                "forecast.window 必须 ≥ 1".to_string(),
            ));
        }
        Ok(Self {
            window: config.window,
        })
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// 尾随滑动平均（最小窗口 1: 首期预测等于自身）
    pub fn trailing_average(&self, values: &[f64]) -> Vec<f64> {
        (0..values.len())
            .map(|i| {
                let start = (i + 1).saturating_sub(self.window);
                let slice = &values[start..=i];
                slice.iter().sum::<f64>() / slice.len() as f64
            })
            .collect()
    }

    /// 补货分类
    ///
    /// - total_received 缺失（无到货记录）→ Reorder Soon
    /// - forecast > received → Reorder Soon
    /// - 其他（含相等）→ OK
    pub fn classify(&self, forecast: f64, total_received: Option<f64>) -> ReorderFlag {
        match total_received {
            None => ReorderFlag::ReorderSoon,
            Some(received) if forecast > received => ReorderFlag::ReorderSoon,
            Some(_) => ReorderFlag::Ok,
        }
    }

    /// 关联后的月度用量 → 最终台账行
    ///
    /// 输出按 (配料, 月份) 升序；报表排序见 `sort_for_report`
    #[instrument(skip(self, rows), fields(rows = rows.len(), window = self.window))]
    pub fn forecast(&self, rows: Vec<JoinedUsageRow>) -> Vec<CombinedLedgerRow> {
        let mut by_ingredient: BTreeMap<String, Vec<JoinedUsageRow>> = BTreeMap::new();
        for row in rows {
            by_ingredient
                .entry(row.ingredient.clone())
                .or_default()
                .push(row);
        }

        let mut ledger = Vec::new();
        for (_, mut series) in by_ingredient {
            series.sort_by_key(|r| r.month);

            let used: Vec<f64> = series.iter().map(|r| r.total_used).collect();
            let forecasts = self.trailing_average(&used);

            ledger.extend(series.into_iter().zip(forecasts).map(|(row, forecast)| {
                let reorder_flag = self.classify(forecast, row.total_received);
                CombinedLedgerRow {
                    gap_received_vs_used: row.total_used - row.total_received.unwrap_or(0.0),
                    month: row.month,
                    ingredient: row.ingredient,
                    total_used: row.total_used,
                    orders: row.orders,
                    total_received: row.total_received,
                    weekly_supply: row.weekly_supply,
                    unit: row.unit,
                    forecast_next_month: forecast,
                    reorder_flag,
                }
            }));
        }

        debug!(
            reorder_rows = ledger.iter().filter(|r| r.reorder_flag.needs_reorder()).count(),
            "预测与分类完成"
        );
        ledger
    }
}

/// 报表排序: ReorderFlag → Ingredient → Month
pub fn sort_for_report(rows: &mut [CombinedLedgerRow]) {
    rows.sort_by(|a, b| {
        a.reorder_flag
            .cmp(&b.reorder_flag)
            .then_with(|| a.ingredient.cmp(&b.ingredient))
            .then_with(|| a.month.cmp(&b.month))
    });
}
