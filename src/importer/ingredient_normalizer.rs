// ==========================================
// MSY 库存智能 - 配料映射表规范化
// ==========================================
// 规范列: Item Name / Ingredient / Units per Item
// 规则:
// - 列名与单元格 TRIM
// - Item Name / Ingredient 为空的行丢弃
// - Units per Item 无法解析 → 0.0
// - 重复 (Item Name, Ingredient) 取 Units per Item 最大值
// ==========================================

use crate::domain::ingredient::IngredientMapping;
use crate::domain::types::TableKind;
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::{ingredient_columns, FieldMapper};
use crate::importer::normalizer_trait::{Normalized, TableNormalizer};
use crate::importer::raw_table::RawTable;
use std::collections::BTreeMap;
use tracing::{debug, instrument};

pub struct IngredientMapNormalizer;

impl TableNormalizer for IngredientMapNormalizer {
    type Record = IngredientMapping;

    fn table_kind(&self) -> TableKind {
        TableKind::IngredientMap
    }

    #[instrument(skip(self, table), fields(table = %table.name, rows = table.row_count()))]
    fn normalize(&self, table: &RawTable) -> ImportResult<Normalized<IngredientMapping>> {
        let mapper = FieldMapper;
        let cleaner = DataCleaner;
        debug!(columns = ?table.headers, "配料映射表列");

        let cols = mapper.require(
            self.table_kind(),
            &table.headers,
            &[
                ingredient_columns::ITEM_NAME,
                ingredient_columns::INGREDIENT,
                ingredient_columns::UNITS_PER_ITEM,
            ],
        )?;
        let (item_col, ingredient_col, units_col) = (cols[0], cols[1], cols[2]);

        // (item_name, ingredient) → max(units_per_item)
        let mut pairs: BTreeMap<(String, String), f64> = BTreeMap::new();
        let mut dropped_rows = 0;
        let mut collapsed_rows = 0;

        for row in &table.rows {
            let item_name = cleaner.clean_text(table.cell(row, item_col));
            let ingredient = cleaner.clean_text(table.cell(row, ingredient_col));
            if item_name.is_empty() || ingredient.is_empty() {
                dropped_rows += 1;
                continue;
            }

            let units = cleaner.coerce_f64(table.cell(row, units_col));
            pairs
                .entry((item_name, ingredient))
                .and_modify(|current| {
                    collapsed_rows += 1;
                    if units > *current {
                        *current = units;
                    }
                })
                .or_insert(units);
        }

        let records: Vec<IngredientMapping> = pairs
            .into_iter()
            .map(|((item_name, ingredient), units_per_item)| IngredientMapping {
                item_name,
                ingredient,
                units_per_item,
            })
            .collect();

        debug!(
            records = records.len(),
            dropped_rows, collapsed_rows, "配料映射表规范化完成"
        );

        Ok(Normalized {
            records,
            dropped_rows,
            collapsed_rows,
        })
    }
}
