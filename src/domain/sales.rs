// ==========================================
// MSY 库存智能 - 销售领域模型
// ==========================================
// 用途: 规范化后的销售行 + 顶层销售汇总
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// SalesRecord - 规范化销售记录
// ==========================================
// 红线: month 始终为月初日期,规范化后不为空
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub month: NaiveDate,  // 月份（月初）
    pub item_name: String, // 菜品名称
    pub count: f64,        // 销售份数（无法解析 → 0）
    pub amount: f64,       // 销售金额（去除 $ 和 , 后解析,无法解析 → 0.0）
}

// ==========================================
// TopLineTotals - 顶层销售汇总
// ==========================================
// 直接由 SalesRecord 求和,与配料展开无关
// 没有配料映射的菜品同样计入
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TopLineTotals {
    pub total_sales: f64,  // Σ Amount
    pub total_orders: f64, // Σ Count
}

impl TopLineTotals {
    pub fn from_sales(sales: &[SalesRecord]) -> Self {
        sales.iter().fold(Self::default(), |acc, record| Self {
            total_sales: acc.total_sales + record.amount,
            total_orders: acc.total_orders + record.count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(item: &str, count: f64, amount: f64) -> SalesRecord {
        SalesRecord {
            month: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            item_name: item.to_string(),
            count,
            amount,
        }
    }

    #[test]
    fn test_top_line_totals_sum() {
        let sales = vec![record("Beef Noodle", 3.0, 45.0), record("Tea", 2.0, 8.5)];
        let totals = TopLineTotals::from_sales(&sales);
        assert_eq!(totals.total_sales, 53.5);
        assert_eq!(totals.total_orders, 5.0);
    }

    #[test]
    fn test_top_line_totals_empty() {
        assert_eq!(TopLineTotals::from_sales(&[]), TopLineTotals::default());
    }
}
