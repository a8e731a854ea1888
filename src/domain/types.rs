// ==========================================
// MSY 库存智能 - 领域类型定义
// ==========================================
// 职责: 到货频率 / 补货标记 / 源表类型
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 到货频率 (Frequency)
// ==========================================
// 未识别的频率不报错,按 weekly 折算 (静默默认)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[default]
    Weekly,   // 每周
    Biweekly, // 每两周
    Monthly,  // 每月
    Other,    // 未识别
}

impl Frequency {
    /// 解析频率文本（TRIM + 小写,不区分大小写）
    ///
    /// 无法识别的值返回 `Frequency::Other`,不视为错误
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "weekly" => Frequency::Weekly,
            "biweekly" => Frequency::Biweekly,
            "monthly" => Frequency::Monthly,
            _ => Frequency::Other,
        }
    }

    /// 周供给折算系数
    ///
    /// - weekly → 1.0
    /// - biweekly → 0.5
    /// - monthly → 0.25
    /// - 其他 → 1.0（与 weekly 相同）
    pub fn weekly_factor(&self) -> f64 {
        match self {
            Frequency::Weekly => 1.0,
            Frequency::Biweekly => 0.5,
            Frequency::Monthly => 0.25,
            Frequency::Other => 1.0,
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frequency::Weekly => write!(f, "weekly"),
            Frequency::Biweekly => write!(f, "biweekly"),
            Frequency::Monthly => write!(f, "monthly"),
            Frequency::Other => write!(f, "other"),
        }
    }
}

// ==========================================
// 补货标记 (Reorder Flag)
// ==========================================
// 排序顺序与文本顺序一致: "OK" < "Reorder Soon"
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ReorderFlag {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "Reorder Soon")]
    ReorderSoon,
}

impl ReorderFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReorderFlag::Ok => "OK",
            ReorderFlag::ReorderSoon => "Reorder Soon",
        }
    }

    pub fn needs_reorder(&self) -> bool {
        matches!(self, ReorderFlag::ReorderSoon)
    }
}

impl fmt::Display for ReorderFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ==========================================
// 源表类型 (Table Kind)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableKind {
    Sales,         // 销售表
    IngredientMap, // 配料映射表
    Shipments,     // 到货表
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableKind::Sales => write!(f, "销售表(Sales)"),
            TableKind::IngredientMap => write!(f, "配料映射表(Ingredient map)"),
            TableKind::Shipments => write!(f, "到货表(Shipments)"),
        }
    }
}
