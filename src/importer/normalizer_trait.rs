// ==========================================
// MSY 库存智能 - 规范化 Trait
// ==========================================
// 职责: 定义"原始表 → 规范记录"接口（不包含实现）
// 实现者: SalesNormalizer / IngredientMapNormalizer / ShipmentNormalizer
// ==========================================

use crate::domain::types::TableKind;
use crate::importer::error::ImportResult;
use crate::importer::raw_table::RawTable;
use serde::{Deserialize, Serialize};

// ==========================================
// Normalized - 规范化产物
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Normalized<T> {
    pub records: Vec<T>,
    pub dropped_rows: usize,   // 被丢弃的行（空主键 / 月份无法解析）
    pub collapsed_rows: usize, // 被合并的重复行
}

// ==========================================
// TableNormalizer Trait
// ==========================================
pub trait TableNormalizer {
    type Record;

    /// 规范化的源表类型（用于错误信息）
    fn table_kind(&self) -> TableKind;

    /// 原始表 → 规范记录
    ///
    /// # 返回
    /// - Ok(Normalized): 规范记录 + 丢弃/合并统计
    /// - Err(ImportError::Schema): 必需列无法解析（致命）
    ///
    /// # 红线
    /// - 不修改输入表
    /// - 单元格级别的解析失败只做静默默认,不报错
    fn normalize(&self, table: &RawTable) -> ImportResult<Normalized<Self::Record>>;
}
