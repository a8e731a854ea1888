// ==========================================
// MSY 库存智能 - 配料映射领域模型
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// IngredientMapping - 菜品 → 配料用量
// ==========================================
// 红线: (item_name, ingredient) 唯一,重复行取 units_per_item 最大值
// 红线: item_name / ingredient 不为空
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientMapping {
    pub item_name: String,   // 菜品名称
    pub ingredient: String,  // 配料名称
    pub units_per_item: f64, // 每份菜品消耗的配料数量
}
