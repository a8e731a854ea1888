// ==========================================
// MSY 库存智能 - 字段映射器实现
// ==========================================
// 职责: 源列名 → 规范列名（TRIM + 不区分大小写 + 别名）
// 红线: 必需列无法解析 → Schema 错误,列出缺失字段与实际列
// ==========================================

use crate::domain::types::TableKind;
use crate::importer::error::{ImportError, ImportResult};

// ==========================================
// ColumnSpec - 规范列定义
// ==========================================
// candidates: 候选列名,按优先级排列（首个为规范名）
// prefix: 候选均未命中时,按小写前缀匹配
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub canonical: &'static str,
    pub candidates: &'static [&'static str],
    pub prefix: Option<&'static str>,
}

impl ColumnSpec {
    pub const fn new(canonical: &'static str, candidates: &'static [&'static str]) -> Self {
        Self {
            canonical,
            candidates,
            prefix: None,
        }
    }

    pub const fn with_prefix(
        canonical: &'static str,
        candidates: &'static [&'static str],
        prefix: &'static str,
    ) -> Self {
        Self {
            canonical,
            candidates,
            prefix: Some(prefix),
        }
    }
}

// ==========================================
// 各表规范列
// ==========================================
pub mod sales_columns {
    use super::ColumnSpec;

    pub const MONTH: ColumnSpec = ColumnSpec::new("Month", &["Month"]);
    pub const ITEM_NAME: ColumnSpec =
        ColumnSpec::new("Item Name", &["Item Name", "ItemName", "item"]);
    pub const COUNT: ColumnSpec = ColumnSpec::new("Count", &["Count", "qty", "quantity"]);
    pub const AMOUNT: ColumnSpec = ColumnSpec::new("Amount", &["Amount"]);
}

pub mod ingredient_columns {
    use super::ColumnSpec;

    pub const ITEM_NAME: ColumnSpec =
        ColumnSpec::new("Item Name", &["Item Name", "ItemName", "item"]);
    pub const INGREDIENT: ColumnSpec =
        ColumnSpec::new("Ingredient", &["Ingredient", "Ingrediant", "Ingredients"]);
    pub const UNITS_PER_ITEM: ColumnSpec = ColumnSpec::with_prefix(
        "Units per Item",
        &["Units per Item", "Units_per_Item", "Unit per item", "UnitsPerItem"],
        "units per item",
    );
}

pub mod shipment_columns {
    use super::ColumnSpec;

    pub const INGREDIENT: ColumnSpec = ColumnSpec::new("Ingredient", &["Ingredient"]);
    pub const QTY_PER_SHIPMENT: ColumnSpec =
        ColumnSpec::new("QtyPerShipment", &["QtyPerShipment", "Quantity per Shipment"]);
    pub const NUM_SHIPMENTS: ColumnSpec =
        ColumnSpec::new("NumShipments", &["NumShipments", "Number of Shipments"]);
    pub const UNIT: ColumnSpec = ColumnSpec::new("Unit", &["Unit", "Unit of Shipment"]);
    pub const FREQUENCY: ColumnSpec = ColumnSpec::new("Frequency", &["Frequency"]);
}

// ==========================================
// FieldMapper - 列解析器
// ==========================================
pub struct FieldMapper;

impl FieldMapper {
    /// 解析单个规范列的位置
    ///
    /// # 规则（命中即返回）
    /// 1. 候选列名按优先级逐个比较（TRIM + 不区分大小写）
    /// 2. 候选未命中且定义了前缀 → 首个以该前缀开头的列
    pub fn resolve(&self, headers: &[String], spec: &ColumnSpec) -> Option<usize> {
        let lowered: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();

        for candidate in spec.candidates {
            let wanted = candidate.to_lowercase();
            if let Some(idx) = lowered.iter().position(|h| *h == wanted) {
                return Some(idx);
            }
        }

        spec.prefix
            .and_then(|prefix| lowered.iter().position(|h| h.starts_with(prefix)))
    }

    /// 解析一组必需列,任一缺失 → Schema 错误
    ///
    /// # 返回
    /// - Ok(Vec<usize>): 与 specs 顺序一致的列位置
    /// - Err(ImportError::Schema): 缺失字段（规范名）+ 实际列列表
    pub fn require(
        &self,
        table: TableKind,
        headers: &[String],
        specs: &[ColumnSpec],
    ) -> ImportResult<Vec<usize>> {
        let resolved: Vec<Option<usize>> =
            specs.iter().map(|spec| self.resolve(headers, spec)).collect();

        let missing: Vec<String> = specs
            .iter()
            .zip(&resolved)
            .filter(|(_, idx)| idx.is_none())
            .map(|(spec, _)| spec.canonical.to_string())
            .collect();

        if !missing.is_empty() {
            return Err(ImportError::Schema {
                table,
                missing,
                found: headers.to_vec(),
            });
        }

        Ok(resolved.into_iter().flatten().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_resolve_case_insensitive_alias() {
        let mapper = FieldMapper;
        let h = headers(&["MONTH", "Item", "QTY"]);
        assert_eq!(mapper.resolve(&h, &sales_columns::MONTH), Some(0));
        assert_eq!(mapper.resolve(&h, &sales_columns::ITEM_NAME), Some(1));
        assert_eq!(mapper.resolve(&h, &sales_columns::COUNT), Some(2));
        assert_eq!(mapper.resolve(&h, &sales_columns::AMOUNT), None);
    }

    #[test]
    fn test_resolve_prefers_canonical_over_alias() {
        let mapper = FieldMapper;
        let h = headers(&["item", "Item Name"]);
        assert_eq!(mapper.resolve(&h, &sales_columns::ITEM_NAME), Some(1));
    }

    #[test]
    fn test_resolve_units_prefix() {
        let mapper = FieldMapper;
        let h = headers(&["Item Name", "Ingredient", "Units per item (g)"]);
        assert_eq!(
            mapper.resolve(&h, &ingredient_columns::UNITS_PER_ITEM),
            Some(2)
        );
    }

    #[test]
    fn test_resolve_misspelled_ingredient() {
        let mapper = FieldMapper;
        let h = headers(&["Item Name", "Ingrediant", "Units per Item"]);
        assert_eq!(mapper.resolve(&h, &ingredient_columns::INGREDIENT), Some(1));
    }

    #[test]
    fn test_require_reports_all_missing() {
        let mapper = FieldMapper;
        let h = headers(&["Ingredient", "Unit"]);
        let err = mapper
            .require(
                TableKind::Shipments,
                &h,
                &[
                    shipment_columns::INGREDIENT,
                    shipment_columns::QTY_PER_SHIPMENT,
                    shipment_columns::NUM_SHIPMENTS,
                ],
            )
            .unwrap_err();

        match err {
            ImportError::Schema {
                table,
                missing,
                found,
            } => {
                assert_eq!(table, TableKind::Shipments);
                assert_eq!(missing, vec!["QtyPerShipment", "NumShipments"]);
                assert_eq!(found, vec!["Ingredient", "Unit"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
