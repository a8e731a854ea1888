// ==========================================
// MSY 库存智能 - 用量/供给台账模型
// ==========================================
// 生命周期: 每次运行从头计算,不持久化
// ==========================================

use crate::domain::types::ReorderFlag;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// UsageRow - 配料消耗行（瞬态）
// ==========================================
// 一条销售记录 × 一条匹配的配料映射 → 一行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageRow {
    pub month: NaiveDate,
    pub item_name: String,
    pub ingredient: String,
    pub count: f64,
    pub units_per_item: f64,
    pub ingredient_usage: f64, // count × units_per_item
}

// ==========================================
// MonthlyIngredientUsage - 月度配料用量
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyIngredientUsage {
    pub month: NaiveDate,
    pub ingredient: String,
    pub total_used: f64, // Σ ingredient_usage
    pub orders: f64,     // Σ count
}

// ==========================================
// JoinedUsageRow - 关联供给后的月度用量
// ==========================================
// 供给字段按配料查找,广播到该配料的所有月份
// 到货表中不存在的配料: 供给字段为 None
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinedUsageRow {
    pub month: NaiveDate,
    pub ingredient: String,
    pub total_used: f64,
    pub orders: f64,
    pub total_received: Option<f64>,
    pub weekly_supply: Option<f64>,
    pub unit: String,
}

// ==========================================
// CombinedLedgerRow - 最终台账行
// ==========================================
// 红线: 每个 (month, ingredient) 仅一行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedLedgerRow {
    pub month: NaiveDate,
    pub ingredient: String,
    pub total_used: f64,
    pub orders: f64,
    pub total_received: Option<f64>,
    pub weekly_supply: Option<f64>,
    pub unit: String,
    pub forecast_next_month: f64,   // 滑动平均预测
    pub gap_received_vs_used: f64,  // total_used − total_received（缺失按 0）
    pub reorder_flag: ReorderFlag,
}
