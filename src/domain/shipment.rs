// ==========================================
// MSY 库存智能 - 到货领域模型
// ==========================================

use crate::domain::types::Frequency;
use serde::{Deserialize, Serialize};

// ==========================================
// ShipmentRecord - 规范化到货记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentRecord {
    pub ingredient: String,      // 配料名称
    pub qty_per_shipment: f64,   // 每批到货数量
    pub num_shipments: f64,      // 到货批次数
    pub frequency: Frequency,    // 到货频率（缺列时为 weekly）
    pub unit: String,            // 到货单位（缺列时为空串）
}

impl ShipmentRecord {
    /// 总到货量 = 每批数量 × 批次数
    pub fn total_received(&self) -> f64 {
        self.qty_per_shipment * self.num_shipments
    }

    /// 周等效供给 = 总到货量 × 频率系数
    pub fn weekly_supply(&self) -> f64 {
        self.total_received() * self.frequency.weekly_factor()
    }
}

// ==========================================
// ShipmentSupply - 按配料预聚合的供给
// ==========================================
// 到货表中同一配料出现多行时,先汇总再关联
// - total_received / weekly_supply: 逐行求和（每行按自身频率折算）
// - unit: 首个非空单位
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentSupply {
    pub ingredient: String,
    pub total_received: f64,
    pub weekly_supply: f64,
    pub unit: String,
    pub source_rows: usize, // 参与汇总的到货行数
}
