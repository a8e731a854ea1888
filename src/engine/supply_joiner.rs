// ==========================================
// MSY 库存智能 - 供给关联引擎
// ==========================================
// 职责: 到货记录按配料预聚合 → 左关联到月度用量
// 红线: 关联键仅为 Ingredient（到货数据不区分月份）
//       同一配料的供给数值广播到该配料的所有月份
// ==========================================

use crate::domain::ledger::{JoinedUsageRow, MonthlyIngredientUsage};
use crate::domain::shipment::{ShipmentRecord, ShipmentSupply};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, instrument};

pub struct SupplyJoiner;

impl SupplyJoiner {
    /// 到货记录按配料预聚合
    ///
    /// # 规则
    /// - total_received: 逐行 qty × num 求和
    /// - weekly_supply: 逐行按自身频率折算后求和
    /// - unit: 首个非空单位
    pub fn aggregate_shipments(&self, shipments: &[ShipmentRecord]) -> Vec<ShipmentSupply> {
        let mut by_ingredient: BTreeMap<&str, ShipmentSupply> = BTreeMap::new();

        for record in shipments {
            let supply = by_ingredient
                .entry(record.ingredient.as_str())
                .or_insert_with(|| ShipmentSupply {
                    ingredient: record.ingredient.clone(),
                    total_received: 0.0,
                    weekly_supply: 0.0,
                    unit: String::new(),
                    source_rows: 0,
                });

            supply.total_received += record.total_received();
            supply.weekly_supply += record.weekly_supply();
            supply.source_rows += 1;
            if supply.unit.is_empty() && !record.unit.is_empty() {
                supply.unit = record.unit.clone();
            }
        }

        by_ingredient.into_values().collect()
    }

    /// 月度用量左关联供给
    ///
    /// 到货表中不存在的配料: total_received / weekly_supply 为 None,unit 为空串
    #[instrument(skip_all, fields(usage = usage.len(), supply = supply.len()))]
    pub fn join(
        &self,
        usage: &[MonthlyIngredientUsage],
        supply: &[ShipmentSupply],
    ) -> Vec<JoinedUsageRow> {
        let lookup: HashMap<&str, &ShipmentSupply> =
            supply.iter().map(|s| (s.ingredient.as_str(), s)).collect();

        let mut without_supply = 0usize;
        let rows: Vec<JoinedUsageRow> = usage
            .iter()
            .map(|u| {
                let matched = lookup.get(u.ingredient.as_str());
                if matched.is_none() {
                    without_supply += 1;
                }
                JoinedUsageRow {
                    month: u.month,
                    ingredient: u.ingredient.clone(),
                    total_used: u.total_used,
                    orders: u.orders,
                    total_received: matched.map(|s| s.total_received),
                    weekly_supply: matched.map(|s| s.weekly_supply),
                    unit: matched.map(|s| s.unit.clone()).unwrap_or_default(),
                }
            })
            .collect();

        debug!(rows = rows.len(), without_supply, "供给关联完成");
        rows
    }
}
