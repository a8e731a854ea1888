// ==========================================
// MSY 库存智能 - 配料用量展开引擎
// ==========================================
// 职责: 销售行 × 配料映射 → 配料消耗行 → (月份, 配料) 汇总
// 规则:
// - 按 item_name 左关联,一道菜可匹配多个配料（一对多展开）
// - ingredient_usage = count × units_per_item
// - 无配料映射的销售行不进入用量,但仍计入顶层销售汇总
// ==========================================

use crate::domain::ingredient::IngredientMapping;
use crate::domain::ledger::{MonthlyIngredientUsage, UsageRow};
use crate::domain::sales::SalesRecord;
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, instrument};

pub struct UsageExpander;

impl UsageExpander {
    /// 一对多展开: 每条 (销售行, 匹配配料) 生成一行
    #[instrument(skip_all, fields(sales = sales.len(), mappings = mappings.len()))]
    pub fn expand(&self, sales: &[SalesRecord], mappings: &[IngredientMapping]) -> Vec<UsageRow> {
        let mut by_item: HashMap<&str, Vec<&IngredientMapping>> = HashMap::new();
        for mapping in mappings {
            by_item
                .entry(mapping.item_name.as_str())
                .or_default()
                .push(mapping);
        }

        let mut unmatched = 0usize;
        let mut usage = Vec::new();

        for record in sales {
            let Some(matches) = by_item.get(record.item_name.as_str()) else {
                unmatched += 1;
                continue;
            };

            usage.extend(matches.iter().map(|mapping| UsageRow {
                month: record.month,
                item_name: record.item_name.clone(),
                ingredient: mapping.ingredient.clone(),
                count: record.count,
                units_per_item: mapping.units_per_item,
                ingredient_usage: record.count * mapping.units_per_item,
            }));
        }

        debug!(usage_rows = usage.len(), unmatched, "配料用量展开完成");
        usage
    }

    /// 按 (月份, 配料) 汇总: total_used = Σ usage, orders = Σ count
    ///
    /// 结果按 (月份, 配料) 升序,便于重复运行得到相同输出
    pub fn aggregate(&self, usage: &[UsageRow]) -> Vec<MonthlyIngredientUsage> {
        let mut groups: BTreeMap<(NaiveDate, &str), (f64, f64)> = BTreeMap::new();
        for row in usage {
            let entry = groups
                .entry((row.month, row.ingredient.as_str()))
                .or_insert((0.0, 0.0));
            entry.0 += row.ingredient_usage;
            entry.1 += row.count;
        }

        groups
            .into_iter()
            .map(|((month, ingredient), (total_used, orders))| MonthlyIngredientUsage {
                month,
                ingredient: ingredient.to_string(),
                total_used,
                orders,
            })
            .collect()
    }

    /// 展开 + 汇总
    pub fn monthly_usage(
        &self,
        sales: &[SalesRecord],
        mappings: &[IngredientMapping],
    ) -> Vec<MonthlyIngredientUsage> {
        let usage = self.expand(sales, mappings);
        self.aggregate(&usage)
    }
}
