// ==========================================
// MSY 库存智能 - 销售表规范化
// ==========================================
// 规范列: Month / Item Name / Count / Amount(可选)
// 别名: item name, item → Item Name; qty, quantity → Count
// ==========================================

use crate::domain::sales::SalesRecord;
use crate::domain::types::TableKind;
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::{sales_columns, FieldMapper};
use crate::importer::normalizer_trait::{Normalized, TableNormalizer};
use crate::importer::raw_table::RawTable;
use tracing::{debug, instrument, warn};

pub struct SalesNormalizer;

impl TableNormalizer for SalesNormalizer {
    type Record = SalesRecord;

    fn table_kind(&self) -> TableKind {
        TableKind::Sales
    }

    #[instrument(skip(self, table), fields(table = %table.name, rows = table.row_count()))]
    fn normalize(&self, table: &RawTable) -> ImportResult<Normalized<SalesRecord>> {
        let mapper = FieldMapper;
        let cleaner = DataCleaner;
        debug!(columns = ?table.headers, "销售表列");

        let cols = mapper.require(
            self.table_kind(),
            &table.headers,
            &[
                sales_columns::MONTH,
                sales_columns::COUNT,
                sales_columns::ITEM_NAME,
            ],
        )?;
        let (month_col, count_col, item_col) = (cols[0], cols[1], cols[2]);
        let amount_col = mapper.resolve(&table.headers, &sales_columns::AMOUNT);

        let month_values: Vec<&str> = table
            .rows
            .iter()
            .map(|row| table.cell(row, month_col))
            .collect();
        let months = cleaner.normalize_months(&month_values);

        let mut records = Vec::with_capacity(table.row_count());
        let mut dropped_rows = 0;

        for (row_idx, (row, month)) in table.rows.iter().zip(months).enumerate() {
            let Some(month) = month else {
                warn!(
                    row = row_idx + 2,
                    value = table.cell(row, month_col),
                    "月份无法解析,跳过该销售行"
                );
                dropped_rows += 1;
                continue;
            };

            records.push(SalesRecord {
                month,
                item_name: cleaner.clean_text(table.cell(row, item_col)),
                count: cleaner.coerce_f64(table.cell(row, count_col)),
                amount: table
                    .optional_cell(row, amount_col)
                    .map(|v| cleaner.coerce_amount(v))
                    .unwrap_or(0.0),
            });
        }

        debug!(records = records.len(), dropped_rows, "销售表规范化完成");

        Ok(Normalized {
            records,
            dropped_rows,
            collapsed_rows: 0,
        })
    }
}
